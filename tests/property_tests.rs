//! Property-based tests for docingest using proptest.
//!
//! These tests verify invariants that must hold for all generated inputs:
//! stable chunk IDs, Markdown heading levels, and Python definition spans.

use proptest::prelude::*;

use docingest::chunk::generate_chunk_id;
use docingest::ingestion::code::extract_elements;
use docingest::ingestion::markdown::split_sections;
use docingest::ingestion::CodeParser;
use docingest::types::{Element, ElementType, Located, SourceType};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Python identifier that can never collide with a keyword.
fn arb_identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}".prop_map(|s| format!("n_{s}"))
}

fn arb_source_type() -> impl Strategy<Value = SourceType> {
    prop_oneof![
        Just(SourceType::Pdf),
        Just(SourceType::Code),
        Just(SourceType::Markdown),
    ]
}

/// A Markdown heading: level and title.
fn arb_heading() -> impl Strategy<Value = (u32, String)> {
    (1u32..=6, "[A-Za-z][A-Za-z0-9 ]{0,20}")
        .prop_map(|(level, title)| (level, title.trim().to_string()))
}

/// Body lines that are never headings or fences.
fn arb_body() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z][a-z0-9 ,.]{0,30}", 0..4)
}

/// One top-level definition: a function, or a class with methods.
#[derive(Debug, Clone)]
enum Def {
    Function(String),
    Class(String, Vec<String>),
}

fn arb_def() -> impl Strategy<Value = Def> {
    prop_oneof![
        arb_identifier().prop_map(Def::Function),
        (
            arb_identifier(),
            proptest::collection::vec(arb_identifier(), 0..4)
        )
            .prop_map(|(name, methods)| Def::Class(name, methods)),
    ]
}

fn render(defs: &[Def]) -> String {
    let mut out = String::new();
    for def in defs {
        match def {
            Def::Function(name) => {
                out.push_str(&format!("def {name}(x):\n    return x\n\n"));
            }
            Def::Class(name, methods) => {
                out.push_str(&format!("class {name}:\n"));
                if methods.is_empty() {
                    out.push_str("    pass\n");
                }
                for m in methods {
                    out.push_str(&format!("    def {m}(self):\n        return 1\n"));
                }
                out.push('\n');
            }
        }
    }
    out
}

// ===========================================================================
// Chunk ID invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chunk_id_is_deterministic(source in "/[a-z/]{1,40}\\.(pdf|md|py)", index in 0usize..10_000) {
        prop_assert_eq!(generate_chunk_id(&source, index), generate_chunk_id(&source, index));
    }

    #[test]
    fn chunk_id_differs_by_index(source in "/[a-z/]{1,40}", a in 0usize..10_000, b in 0usize..10_000) {
        prop_assume!(a != b);
        prop_assert_ne!(generate_chunk_id(&source, a), generate_chunk_id(&source, b));
    }

    #[test]
    fn chunk_id_is_uuid_shaped(source in ".{0,60}", index in 0usize..100) {
        let id = generate_chunk_id(&source, index);
        prop_assert_eq!(id.len(), 36);
        prop_assert!(uuid_version(&id) == Some('5'), "not a v5 uuid: {}", id);
    }

    #[test]
    fn source_type_as_str_roundtrip(st in arb_source_type()) {
        prop_assert_eq!(SourceType::from_str_loose(st.as_str()), Some(st));
        prop_assert_eq!(format!("{}", st), st.as_str());
    }
}

fn uuid_version(id: &str) -> Option<char> {
    id.chars().nth(14)
}

// ===========================================================================
// Markdown invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn first_section_is_level_zero(text in ".{0,200}") {
        let sections = split_sections(&text, "/doc.md");
        prop_assert!(!sections.is_empty());
        prop_assert_eq!(sections[0].level, 0);
        prop_assert_eq!(sections[0].title.as_str(), "");
    }

    #[test]
    fn headings_map_to_sections(
        intro in arb_body(),
        parts in proptest::collection::vec((arb_heading(), arb_body()), 0..8),
    ) {
        let mut text = String::new();
        for line in &intro {
            text.push_str(line);
            text.push('\n');
        }
        for ((level, title), body) in &parts {
            text.push_str(&"#".repeat(*level as usize));
            text.push(' ');
            text.push_str(title);
            text.push('\n');
            for line in body {
                text.push_str(line);
                text.push('\n');
            }
        }

        let sections = split_sections(&text, "/doc.md");
        prop_assert_eq!(sections.len(), parts.len() + 1);

        let expected_intro: String = intro.iter().map(|l| format!("{}\n", l.trim())).collect();
        prop_assert_eq!(&sections[0].content, &expected_intro);

        for (section, ((level, title), body)) in sections[1..].iter().zip(&parts) {
            prop_assert_eq!(section.level, *level);
            prop_assert_eq!(&section.title, title);
            let expected: String = body.iter().map(|l| format!("{}\n", l.trim())).collect();
            prop_assert_eq!(&section.content, &expected);
            prop_assert_eq!(section.source.as_str(), "/doc.md");
        }
    }

    #[test]
    fn section_content_has_no_blank_lines(text in "[a-z# \n`]{0,200}") {
        for section in split_sections(&text, "/doc.md") {
            prop_assert!(section.content.is_empty() || section.content.ends_with('\n'));
            prop_assert!(section.content.lines().all(|l| !l.trim().is_empty()));
        }
    }
}

// ===========================================================================
// Python extraction invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn definitions_are_extracted_in_order(defs in proptest::collection::vec(arb_def(), 0..6)) {
        let code = render(&defs);
        let tree = CodeParser::new().parse(&code).unwrap();
        let elements = extract_elements(&tree, &code, "/gen.py");

        prop_assert_eq!(elements.len(), defs.len());
        for (element, def) in elements.iter().zip(&defs) {
            match (element, def) {
                (Element::Function(f), Def::Function(name)) => {
                    prop_assert_eq!(&f.name, name);
                    let header = format!("def {}(", name);
                    prop_assert!(f.content.starts_with(&header), "unexpected content: {:?}", f.content);
                }
                (Element::Class(c), Def::Class(name, methods)) => {
                    prop_assert_eq!(&c.name, name);
                    prop_assert_eq!(&c.methods, methods);
                }
                (got, want) => {
                    prop_assert!(false, "mismatch: {:?} vs {:?}", got.element_type(), want);
                }
            }
        }
    }

    #[test]
    fn spans_cover_their_content(defs in proptest::collection::vec(arb_def(), 1..6)) {
        let code = render(&defs);
        let lines: Vec<&str> = code.lines().collect();
        let tree = CodeParser::new().parse(&code).unwrap();

        for element in extract_elements(&tree, &code, "/gen.py") {
            let (start, end) = (element.start_line() as usize, element.end_line() as usize);
            prop_assert!(start >= 1);
            prop_assert!(end >= start);
            let span = lines[start - 1..end].join("\n");
            prop_assert_eq!(span.trim_end(), element.content().trim_end());
            prop_assert!(matches!(
                element.element_type(),
                ElementType::Function | ElementType::Class
            ));
            prop_assert_eq!(element.source(), "/gen.py");
        }
    }
}
