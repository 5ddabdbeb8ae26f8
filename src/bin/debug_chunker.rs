use singlish_rs::{ChunkType, Chunker, Transliterator};

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Ammaa edhdhi parippu 2kg genavaa. Rs10000 FYI pan$sal ගෙදර".to_string());
    println!("Input: {}", input);

    let chunker = Chunker::new(&input);
    let chunks = chunker.make_chunks();

    println!("\nChunks:");
    for (i, chunk) in chunks.iter().enumerate() {
        println!(
            "  {}: {:?} - type: {:?}, bytes: {}..{}",
            i,
            chunk.text(&input),
            chunk.chunk_type,
            chunk.start,
            chunk.end()
        );
    }

    let words = chunks
        .iter()
        .filter(|c| c.chunk_type == ChunkType::Word)
        .count();
    println!("\nWord chunks count: {}", words);

    println!("\nTokens:");
    for token in Transliterator::new().tokenize(&input) {
        if !token.is_whitespace() {
            println!("  {:<10} {}", token.kind.as_str(), token);
        }
    }
}
