//! End-to-end conversion tests
//!
//! Sentences below are typical chat-style Singlish inputs with the Sinhala
//! output a native reader expects, plus the behaviors the engine must keep
//! for mixed English, numerals, symbols and whitespace.

use singlish_rs::{
    get_char_category, reassemble, CharCategory, ChunkType, Chunker, Config, EngineData,
    EngineOptions, LiveSession, Origin, PassthroughReason, TokenKind, Transliterator,
};
use std::fs;
use tempfile::TempDir;

fn assert_converts(input: &str, expected: &str) {
    let engine = Transliterator::new();
    assert_eq!(engine.convert(input), expected, "input: {:?}", input);
}

// =============================================================================
// Everyday Sentences
// =============================================================================

#[test]
fn test_simple_sentence() {
    assert_converts("mama mal kadanavaa", "මම මල් කඩනවා");
}

#[test]
fn test_sentence_with_comma() {
    assert_converts(
        "Mata saniipa naethi nisaa, heta enna baeri veyi",
        "මට සනීප නැති නිසා, හෙට එන්න බැරි වෙයි",
    );
}

#[test]
fn test_question() {
    assert_converts("Oyaa hodhin innavaa nedha?", "ඔයා හොදින් ඉන්නවා නේද?");
    assert_converts("Api dhaen mokadha karannea?", "අපි දැන් මොකද කරන්නේ?");
    assert_converts("Oyaata meaka mathakadha?", "ඔයාට මේක මතකද?");
}

#[test]
fn test_long_sentence() {
    assert_converts(
        "karunaakara mata ee gaena dhanuvath karanna, mokadha eeka mata ithaamath vaedhagath .",
        "කරුනාකර මට ඒ ගැන දනුවත් කරන්න, මොකද ඒක මට ඉතාමත් වැදගත් .",
    );
    assert_converts(
        "Api edhaa oyaa enakam balan hitiyaa, haebaeyi oyaa avee naethi nisaa edhaa api giyeth naehae.",
        "අපි එදා ඔයා එනකම් බලන් හිටියා, හැබැයි ඔයා අවේ නැති නිසා එදා අපි ගියෙත් නැහැ.",
    );
}

#[test]
fn test_case_marked_consonants() {
    assert_converts(
        "mama iiLaGa vaessa avoth paasal yannee naehae",
        "මම ඊළඟ වැස්ස අවොත් පාසල් යන්නේ නැහැ",
    );
    assert_converts(
        "mata help ekak karanna puLuvandha?",
        "මට help එකක් කරන්න පුළුවන්ද?",
    );
}

#[test]
fn test_short_sentences() {
    assert_converts("ov mama karannan", "ඔව් මම කරන්නන්");
    assert_converts("Ammaa kadee giyaa.", "අම්මා කඩේ ගියා.");
    assert_converts("loku loku dhevaal tika gannan.", "ලොකු ලොකු දෙවාල් ටික ගන්නන්.");
    assert_converts("Ennayi kivve mehaata", "එන්නයි කිව්වෙ මෙහාට");
}

#[test]
fn test_exclamation() {
    assert_converts("Ammatasiri, supiriyak thamaa!", "අම්මටසිරි, සුපිරියක් තමා!");
}

#[test]
fn test_two_clauses() {
    assert_converts(
        "samaavenna, mata thavath tika velaavak oonee meeka kiyavanna",
        "සමාවෙන්න, මට තවත් ටික වෙලාවක් ඕනේ මේක කියවන්න",
    );
    assert_converts(
        "mama dhaen yanna hadhanne, oyath enavadha maath ekka yanna?",
        "මම දැන් යන්න හදන්නෙ, ඔයත් එනවද මාත් එක්ක යන්න?",
    );
}

// =============================================================================
// Mixed English, Brands and Acronyms
// =============================================================================

#[test]
fn test_english_words_pass_through() {
    assert_converts("mama dhaen office ekea vaeda.", "මම දැන් office එකේ වැඩ.");
}

#[test]
fn test_brand_names_pass_through() {
    assert_converts(
        "api passee WhatsApp group ekee message dhaala LinkedIn profile eka update karamu",
        "අපි පස්සේ WhatsApp group එකේ message දාල LinkedIn profile එක update කරමු",
    );
}

#[test]
fn test_place_names_pass_through() {
    assert_converts("Api heta Galle yanavaa", "අපි හෙට Galle යනවා");
}

#[test]
fn test_acronyms_pass_through() {
    assert_converts(
        "machan mata PIN code ekayi OTP ekayi SMS ekaking evanna FYI.",
        "මචන් මට PIN code එකයි OTP එකයි SMS එකකින්ග් එවන්න FYI.",
    );
}

#[test]
fn test_vowelless_words_unchanged() {
    assert_converts("xxxxx yyyyy zzzzz", "xxxxx yyyyy zzzzz");
}

#[test]
fn test_lexicon_wins_over_heuristics() {
    assert_converts("Haii", "හායි");
    assert_converts("haii machan", "හායි මචන්");
}

#[test]
fn test_passthrough_reasons() {
    let tokens = Transliterator::new().tokenize("WhatsApp OTP xyz Zürich blorp");
    let reasons: Vec<_> = tokens
        .iter()
        .filter(|t| !t.is_whitespace())
        .map(|t| (t.text.as_str(), t.reason))
        .collect();

    assert_eq!(reasons[0], ("WhatsApp", Some(PassthroughReason::AllowList)));
    assert_eq!(reasons[1], ("OTP", Some(PassthroughReason::Acronym)));
    assert_eq!(reasons[2], ("xyz", Some(PassthroughReason::NoVowel)));
    assert_eq!(reasons[3], ("Zürich", Some(PassthroughReason::Foreign)));
    // Phonetic mapping always succeeds for plain ASCII letters with a vowel
    assert_eq!(reasons[4].1, None);
}

// =============================================================================
// Numerals and Symbols
// =============================================================================

#[test]
fn test_numeral_with_unit() {
    assert_converts(
        "Ammaa edhdhi parippu 2kg genavaa.",
        "අම්මා එද්දි පරිප්පු 2kg ගෙනවා.",
    );
}

#[test]
fn test_currency_amount() {
    assert_converts(
        "mama meeka Rs10000 vikuNalaa, aluth vaahanayak gannavaa.",
        "මම මේක Rs10000 විකුණලා, අලුත් වාහනයක් ගන්නවා.",
    );
}

#[test]
fn test_numbers_only() {
    assert_converts("845 654", "845 654");
    assert_converts("10:30am", "10:30am");
}

#[test]
fn test_numeral_glued_to_word() {
    assert_converts("1eka", "1එක");
    assert_converts("2kgx", "2kgx");
}

#[test]
fn test_numeral_tokens() {
    let tokens = Transliterator::new().tokenize("Rs10000 2kg 3.5");
    let numerals: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Numeral)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(numerals, vec!["Rs10000", "2kg", "3.5"]);
    assert!(tokens.iter().all(|t| !t.is_converted()));
}

#[test]
fn test_symbols_inside_words_are_kept() {
    // Symbols split words but are never deleted
    let output = Transliterator::new().convert("ma@ma heta pan$sal yann%a inne/.");
    for symbol in ['@', '$', '%', '/', '.'] {
        assert!(output.contains(symbol), "lost {:?} in {:?}", symbol, output);
    }
    assert!(output.contains("හෙට"));
}

#[test]
fn test_trailing_punctuation_run() {
    assert_converts("Oyata kohomadaaaa????", "ඔයාට කොහොමද????");
}

// =============================================================================
// Whitespace Preservation
// =============================================================================

#[test]
fn test_empty_input() {
    let engine = Transliterator::new();
    assert_eq!(engine.convert(""), "");
    assert!(engine.tokenize("").is_empty());
    assert!(engine.convert_detailed("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert_converts("   \t\n ", "   \t\n ");
}

#[test]
fn test_space_runs_preserved() {
    assert_converts(
        "thaaththaa        gedhara          avaa.",
        "තාත්තා        ගෙදර          අවා.",
    );
    assert_converts(
        "mama          heta          office          ekata          yanna          hadhannee          Traffic          nisaa",
        "මම          හෙට          office          එකට          යන්න          හදන්නේ          Traffic          නිසා",
    );
}

#[test]
fn test_line_breaks_preserved() {
    assert_converts("oyaa yanna,\nmama innam", "ඔයා යන්න,\nමම ඉන්නම්");
    assert_converts("mama  gedhara\tyanavaa", "මම  ගෙදර\tයනවා");

    let tokens = Transliterator::new().tokenize("oyaa yanna,\nmama innam");
    assert!(tokens.iter().any(|t| t.has_line_break()));
}

#[test]
fn test_leading_and_trailing_whitespace() {
    assert_converts("  mama  ", "  මම  ");
}

#[test]
fn test_tokens_partition_input() {
    let text = "Ammaa edhdhi parippu 2kg genavaa.  (WhatsApp)\n";
    let tokens = Transliterator::new().tokenize(text);

    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.start, offset);
        assert_eq!(&text[token.start..token.end()], token.text);
        offset = token.end();
    }
    assert_eq!(offset, text.len());
}

// =============================================================================
// Capitalization and Elongation
// =============================================================================

#[test]
fn test_long_words_convert() {
    let n = 100_000;
    let engine = Transliterator::new();
    assert_eq!(engine.convert(&"m".repeat(n)), "m".repeat(n));
    assert_eq!(engine.convert(&"a".repeat(n)), "අ");
    assert_eq!(engine.convert(&"ma".repeat(n / 2)), "ම".repeat(n / 2));
}

#[test]
fn test_random_capitalization() {
    assert_converts("mAmA gEdHaRa YaNaVaA", "මම ගෙදර යනවා");
}

#[test]
fn test_elongated_word() {
    let engine = Transliterator::new();
    assert_eq!(engine.convert("kohomadaaaa"), engine.convert("kohomada"));
}

#[test]
fn test_elongation_can_be_disabled() {
    let options = EngineOptions {
        collapse_elongation: false,
        ..EngineOptions::default()
    };
    let engine = Transliterator::new().with_options(options);
    assert_ne!(engine.convert("kohomadaaaa"), "කොහොමද");
}

// =============================================================================
// Lexicon
// =============================================================================

#[test]
fn test_lexicon_overrides_rules() {
    let tokens = Transliterator::new().tokenize("Oyata nedha");
    let words: Vec<_> = tokens.iter().filter(|t| !t.is_whitespace()).collect();
    assert_eq!(words[0].rendered, "ඔයාට");
    assert_eq!(words[0].origin, Origin::Lexicon);
    assert_eq!(words[1].rendered, "නේද");
}

#[test]
fn test_phrase_spans_whitespace() {
    let engine = Transliterator::new();
    assert_eq!(engine.convert("Bohoma   Sthuthi!"), "බොහොම   ස්තුති!");

    let tokens = engine.tokenize("bohoma sthuthi");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].tag.as_deref(), Some("PHRASE"));
}

#[test]
fn test_sinhala_text_untouched() {
    assert_converts("ආයුබෝවන් mama", "ආයුබෝවන් මම");

    let tokens = Transliterator::new().tokenize("ආයුබෝවන්");
    assert_eq!(tokens[0].kind, TokenKind::SinhalaText);
}

// =============================================================================
// Live Typing
// =============================================================================

#[test]
fn test_keystrokes_match_one_shot() {
    let engine = Transliterator::new();
    let text = "machan mata PIN code ekayi evanna.";
    let mut session = LiveSession::new(engine.clone());

    for (i, c) in text.chars().enumerate() {
        session.push_char(c);
        let typed: String = text.chars().take(i + 1).collect();
        assert_eq!(session.output(), engine.convert(&typed));
    }
}

#[test]
fn test_deletion_leaves_no_fragments() {
    let mut session = LiveSession::new(Transliterator::new());
    session.insert_str("mama gedhara yanavaa");
    assert_eq!(session.output(), "මම ගෙදර යනවා");

    assert_eq!(session.backspace(7), 7);
    let output = session.output();
    assert_eq!(output, "මම ගෙදර ");
    assert!(!output.contains("යනවා"));

    session.insert_str("enavaa");
    assert_eq!(session.output(), "මම ගෙදර එනවා");
}

#[test]
fn test_stale_snapshot_detected() {
    let mut session = LiveSession::new(Transliterator::new());
    session.insert_str("heta");
    let before = session.snapshot();
    session.push_char(' ');
    assert!(!before.is_current(&session));
    assert!(session.snapshot().is_current(&session));
}

// =============================================================================
// Reassembly
// =============================================================================

#[test]
fn test_segments_mark_converted_text() {
    let tokens = Transliterator::new().tokenize("mama office ekata");
    let result = reassemble(&tokens);
    assert_eq!(result.as_string(), "මම office එකට");

    let verbatim: String = result.verbatim().map(|s| s.text.as_str()).collect();
    assert_eq!(verbatim, " office ");
    assert_eq!(result.converted().count(), 2);
    assert_eq!(result.to_string(), result.as_string());
}

// =============================================================================
// Chunking
// =============================================================================

#[test]
fn test_char_categories() {
    assert_eq!(get_char_category('ම'), CharCategory::Sinhala);
    assert_eq!(get_char_category('m'), CharCategory::Latin);
    assert_eq!(get_char_category('7'), CharCategory::Digit);
    assert_eq!(get_char_category('\n'), CharCategory::Whitespace);
}

#[test]
fn test_chunk_types() {
    let text = "mama 2kg, මල් 😀";
    let chunker = Chunker::new(text);
    let types: Vec<_> = chunker.make_chunks().iter().map(|c| c.chunk_type).collect();
    assert_eq!(
        types,
        vec![
            ChunkType::Word,
            ChunkType::Space,
            ChunkType::Numeral,
            ChunkType::Punct,
            ChunkType::Space,
            ChunkType::Sinhala,
            ChunkType::Space,
            ChunkType::Other,
        ]
    );
}

// =============================================================================
// Data Files and Configuration
// =============================================================================

#[test]
fn test_extra_data_files() {
    let dir = TempDir::new().unwrap();
    let lexicon = dir.path().join("slang.tsv");
    let allow = dir.path().join("brands.txt");
    fs::write(&lexicon, "# slang\nmachan\tමචං\tNOUN\t900\n").unwrap();
    fs::write(&allow, "keells\n").unwrap();

    let mut data = EngineData::builtin();
    assert_eq!(data.load_lexicon_file(&lexicon).unwrap(), 1);
    assert_eq!(data.load_passthrough_file(&allow).unwrap(), 1);

    let engine = data.build(EngineOptions::default());
    assert_eq!(engine.convert("machan Keells yanavaa"), "මචං Keells යනවා");
}

#[test]
fn test_config_with_pack() {
    let dir = TempDir::new().unwrap();
    let pack = dir.path().join("packs/colloquial/passthrough");
    fs::create_dir_all(&pack).unwrap();
    fs::write(pack.join("brands.txt"), "arpico\n").unwrap();

    let config_path = dir.path().join("singlish.toml");
    fs::write(
        &config_path,
        "[engine]\nmemo_capacity = 16\n\n[data]\npack = \"colloquial\"\npack_dir = \"packs\"\n",
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let mut session = config.build_session().unwrap();
    session.insert_str("mama Arpico yanavaa");
    assert_eq!(session.output(), "මම Arpico යනවා");
}

#[test]
fn test_missing_pack_is_an_error() {
    let config = Config::from_toml_str("[data]\npack = \"nope\"\npack_dir = \"/no/such/dir\"\n")
        .unwrap();
    assert!(config.build_transliterator().is_err());
}
