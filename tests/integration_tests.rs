//! End-to-end tests over realistic documents, exercising the lexer, tree
//! builder, CSV reader, and both writers together.

use parsekit::{
    json, parse_tree, CsvReader, CsvWriter, Error, FieldOutcome, JsonWriter, Lexer, TokenKind,
    Tokenize,
};

const DOCUMENT: &str = r#"{
    name: "Suzie Cobol"
    age: 73
    "understated popularity": -20.05
    caps-loco?: yes
    children: [
        {name: "Angus" age: 55},
        "Lizzie","Gunnar"
        [ << !this bracket is skipped! >> ]
    ]
    break
    << !this tail is also skipped! >>
}"#;

#[test]
fn document_builds_the_expected_tree() {
    let tree = parse_tree(DOCUMENT);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].kind, TokenKind::Brace);

    let fields = tree[0].as_list().unwrap();
    assert_eq!(fields[0].as_str(), Some("name"));
    assert_eq!(fields[0].kind, TokenKind::Let);
    assert_eq!(fields[1].as_str(), Some("Suzie Cobol"));
    assert_eq!(fields[2].as_str(), Some("age"));
    assert_eq!(fields[3].as_i64(), Some(73));
    assert_eq!(fields[4].as_str(), Some("understated popularity"));
    assert_eq!(fields[4].kind, TokenKind::Let);
    assert_eq!(fields[5].as_f64(), Some(-20.05));
    assert_eq!(fields[6].as_str(), Some("caps-loco?"));
    assert_eq!(fields[7].as_str(), Some("yes"));
    assert_eq!(fields[7].kind, TokenKind::Sym);

    assert_eq!(fields[8].as_str(), Some("children"));
    let children = fields[9].as_list().unwrap();
    assert_eq!(fields[9].kind, TokenKind::Bracket);
    // brace node, comma, Lizzie, comma, Gunnar, skipped-content bracket
    assert_eq!(children.len(), 6);
    assert!(children[1].is_separator());
    assert_eq!(children[2].as_str(), Some("Lizzie"));
    assert_eq!(children[4].as_str(), Some("Gunnar"));
    assert_eq!(children[5].kind, TokenKind::Bracket);

    let angus = children[0].as_list().unwrap();
    assert_eq!(angus[1].as_str(), Some("Angus"));
    assert_eq!(angus[3].as_i64(), Some(55));
}

#[test]
fn token_walk_with_recovery_skips() {
    let mut lexer = Lexer::new(DOCUMENT);
    assert_eq!(lexer.next_token().kind(), TokenKind::Brace);

    let mut keys = Vec::new();
    loop {
        let tok = lexer.next_token();
        if tok.kind().ends_list() {
            break;
        }
        if tok.kind() == TokenKind::Sym && tok.to_text() == "break" {
            // everything up to the enclosing closer is discarded
            lexer.skip_to_end(TokenKind::Any);
            break;
        }
        assert_eq!(tok.kind(), TokenKind::Let);
        let key = tok.to_text().into_owned();
        match key.as_str() {
            "name" => assert_eq!(lexer.next_token().to_text(), "Suzie Cobol"),
            "age" => assert_eq!(lexer.next_token().to_i64(), Ok(73)),
            "understated popularity" => {
                assert_eq!(lexer.next_token().to_f64(), Ok(-20.05));
            }
            "caps-loco?" => assert_eq!(lexer.next_token().to_text(), "yes"),
            "children" => {
                let open = lexer.next_token().kind();
                assert_eq!(open, TokenKind::Bracket);
                lexer.skip_token(open);
            }
            other => panic!("unexpected key: {other}"),
        }
        keys.push(key);
    }

    assert_eq!(
        keys,
        ["name", "age", "understated popularity", "caps-loco?", "children"]
    );
    assert_eq!(lexer.next_token().kind(), TokenKind::Stop);
}

#[test]
fn json_writer_literal_scenario() -> parsekit::Result<()> {
    let mut json = JsonWriter::new();
    json.begin_object()?;
    json.name("a").value(1i64);
    json.name("b").begin_array()?;
    json.value(2i64).value(3i64);
    json.end_array()?;
    json.end_object()?;
    assert_eq!(json.as_str(), r#"{"a":1,"b":[2,3]}"#);
    Ok(())
}

#[test]
fn csv_writer_literal_scenario() {
    let mut csv = CsvWriter::new();
    csv.begin_record().value("x").value(1i64);
    csv.begin_record().value("y").value(2i64);
    assert_eq!(csv.as_str(), "\"x\",1\n\"y\",2");
}

#[test]
fn csv_reader_literal_scenario() {
    let mut csv = CsvReader::new("a,b,c\n1,2,3\n4,5,6\n");
    csv.read_header();
    assert_eq!(csv.header(), ["a", "b", "c"]);
    assert_eq!(csv.column("a"), Some(0));
    assert_eq!(csv.column("missing"), None);

    for expected in [[1i64, 2, 3], [4, 5, 6]] {
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(csv.read_i64(), Ok(*want));
            if i < 2 {
                assert_eq!(csv.outcome(), FieldOutcome::Record);
            }
        }
    }
    // the third field of row one ends the record; the final row's
    // terminator exhausts the input
    assert!(csv.done());
}

#[test]
fn csv_row_terminators_are_classified() {
    let mut csv = CsvReader::new("1,2,3\n4,5,6\n");
    for _ in 0..2 {
        csv.read_field();
        assert_eq!(csv.outcome(), FieldOutcome::Record);
    }
    csv.read_field();
    assert_eq!(csv.outcome(), FieldOutcome::EndOfRecord);
    for _ in 0..2 {
        csv.read_field();
        assert_eq!(csv.outcome(), FieldOutcome::Record);
    }
    csv.read_field();
    assert_eq!(csv.outcome(), FieldOutcome::EndOfFile);
}

/// The legacy implementation returned 0 for malformed numeric fields,
/// conflating them with absent ones. This implementation reports the
/// conversion failure; absent/empty fields still coerce to zero.
#[test]
fn coercion_failure_is_reported() {
    let mut csv = CsvReader::new("abc,,42");
    assert_eq!(
        csv.read_i64(),
        Err(Error::coercion("abc", "i64"))
    );
    assert_eq!(csv.read_i64(), Ok(0));
    assert_eq!(csv.read_i64(), Ok(42));
}

/// The legacy reader overwrote terminator bytes in place; this reader
/// borrows the buffer and leaves it untouched.
#[test]
fn scanning_does_not_mutate_the_buffer() {
    let input = String::from("a,b\n\"q\",2\n");
    let snapshot = input.clone();
    let mut csv = CsvReader::new(&input);
    loop {
        csv.read_field();
        if csv.done() {
            break;
        }
    }
    assert_eq!(input, snapshot);
}

#[test]
fn escape_literal_scenario() {
    let escaped = json::escape("a\"b\\c");
    assert_eq!(escaped, "a\\\"b\\\\c");
    assert_eq!(escaped.as_bytes(), br#"a\"b\\c"#);
}

#[test]
fn writers_nest_via_verbatim() -> parsekit::Result<()> {
    let mut inner = JsonWriter::new();
    inner.begin_array()?;
    inner.value(1i64).value(2i64);
    inner.end_array()?;

    let mut outer = JsonWriter::new();
    outer.begin_object()?;
    outer.name("items").verbatim(inner.as_str());
    outer.name("count").value(2i64);
    outer.end_object()?;
    assert_eq!(outer.as_str(), r#"{"items":[1,2],"count":2}"#);
    Ok(())
}

#[test]
fn mixed_typed_reads() {
    let mut csv = CsvReader::with_header("id,score,ratio,ok,label\n7,250,0.5,true,alpha\n");
    assert_eq!(csv.read_u8(), Ok(7));
    assert_eq!(csv.read_i16(), Ok(250));
    assert_eq!(csv.read_f32(), Ok(0.5));
    assert_eq!(csv.read_bool(), Ok(true));
    assert_eq!(csv.read_str(), "alpha");
    assert!(csv.done());
}

#[test]
fn quoted_csv_fields_unescape_like_token_strings() {
    let mut csv = CsvReader::new("\"line\\none\",\"tab\\tsep\"\n");
    assert_eq!(csv.read_str(), "line\none");
    assert_eq!(csv.read_str(), "tab\tsep");
}
