//! Chunk → index → retrieve over a short contract.

use rag_base::{
    ChunkConfig, HashingEmbedder, RagBaseError, RagConfig, index_document, search::retrieve,
};

const CONTRACT: &str = "The term is 12 months. Confidentiality survives termination.";

fn small_chunks() -> RagConfig {
    RagConfig {
        chunk: ChunkConfig {
            size: 30,
            overlap: 5,
        },
        ..RagConfig::default()
    }
}

#[tokio::test]
async fn question_finds_the_term_clause() {
    let cfg = small_chunks();
    let embedder = HashingEmbedder::new(384).unwrap();

    let (index, stats) = index_document(CONTRACT, &cfg, &embedder).await.unwrap();
    assert_eq!(stats.indexed, 3);
    assert_eq!(stats.dim, 384);

    let hits = retrieve(Some(&index), "How long is the term?", &embedder, 4, None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].chunk_index, 0);
    assert!(hits[0].text.contains("12 months"));
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn k_larger_than_index_returns_everything_once() {
    let cfg = small_chunks();
    let embedder = HashingEmbedder::new(64).unwrap();
    let (index, _) = index_document(CONTRACT, &cfg, &embedder).await.unwrap();

    let hits = retrieve(Some(&index), "termination", &embedder, 10, None)
        .await
        .unwrap();
    let mut seen: Vec<usize> = hits.iter().map(|h| h.chunk_index).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2]);
}

#[tokio::test]
async fn blank_text_is_an_empty_document() {
    let embedder = HashingEmbedder::new(8).unwrap();
    let err = index_document(" \n ", &RagConfig::default(), &embedder)
        .await
        .unwrap_err();
    assert!(matches!(err, RagBaseError::EmptyDocument));
}
