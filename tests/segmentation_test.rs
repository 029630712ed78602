//! Chunk segmentation tests.
//!
//! The same body must decode to the same tokens and the same result no
//! matter how the transport cuts it: one byte at a time, all at once, or
//! at arbitrary points (including inside multi-byte characters).

use bytes::Bytes;
use codebase_chat::error::ChatError;
use codebase_chat::stream::{DecodeSession, StreamOutcome, TokenStream, Utf8Decoder, WireFormat};
use codebase_chat::traits::HttpError;
use futures::StreamExt;

type Decoded = (Vec<String>, Result<StreamOutcome, ChatError>);

/// Split points from a small linear congruential generator so runs are repeatable.
fn pseudo_random_cuts(len: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    let mut cuts = Vec::new();
    let mut pos = 0;
    while pos < len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let step = 1 + (state >> 33) as usize % 17;
        pos = (pos + step).min(len);
        cuts.push(pos);
    }
    cuts
}

fn segment(body: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut start = 0;
    cuts.iter()
        .map(|&end| {
            let chunk = body[start..end].to_vec();
            start = end;
            chunk
        })
        .collect()
}

fn decode_push(chunks: &[Vec<u8>], format: WireFormat) -> Decoded {
    let mut utf8 = Utf8Decoder::new();
    let mut session = DecodeSession::new(format);
    let mut tokens = Vec::new();
    for chunk in chunks {
        let text = utf8.decode(chunk);
        if let Err(e) = session.feed(&text, |t| tokens.push(t.to_string())) {
            return (tokens, Err(e));
        }
    }
    if let Err(e) = session.feed(&utf8.finish(), |t| tokens.push(t.to_string())) {
        return (tokens, Err(e));
    }
    let result = session.finish(|t| tokens.push(t.to_string()));
    (tokens, result)
}

async fn decode_pull(chunks: &[Vec<u8>], format: WireFormat) -> Decoded {
    let items: Vec<Result<Bytes, HttpError>> =
        chunks.iter().map(|c| Ok(Bytes::from(c.clone()))).collect();
    let mut stream = TokenStream::new(
        Box::pin(futures::stream::iter(items)),
        DecodeSession::new(format),
    );
    let mut tokens = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(token) => tokens.push(token),
            Err(e) => return (tokens, Err(e)),
        }
    }
    let outcome = stream.outcome().expect("outcome after clean end");
    (tokens, Ok(outcome))
}

async fn assert_segmentation_invariant(body: &str, format: WireFormat) {
    let bytes = body.as_bytes();
    let whole = decode_push(&[bytes.to_vec()], format);

    let single_bytes: Vec<usize> = (1..=bytes.len()).collect();
    let mut segmentations = vec![segment(bytes, &single_bytes)];
    for seed in 0..20 {
        segmentations.push(segment(bytes, &pseudo_random_cuts(bytes.len(), seed)));
    }

    for chunks in &segmentations {
        assert_eq!(decode_push(chunks, format), whole, "push, {} chunks", chunks.len());
        assert_eq!(decode_pull(chunks, format).await, whole, "pull, {} chunks", chunks.len());
    }
}

#[tokio::test]
async fn test_successful_stream() {
    assert_segmentation_invariant(
        "{\"content\":\"Héllo\"}\r\n\n{\"content\":\" wörld 🦀\"}\n{\"content\":\"\"}\n{\"done\":true}\n",
        WireFormat::DoneError,
    )
    .await;
}

#[tokio::test]
async fn test_error_frame() {
    assert_segmentation_invariant(
        "{\"content\":\"日本\"}\n{\"error\":\"generation failed\"}\n",
        WireFormat::DoneError,
    )
    .await;
}

#[tokio::test]
async fn test_frame_after_terminal() {
    assert_segmentation_invariant(
        "{\"content\":\"a\"}\n{\"done\":true}\n{\"content\":\"late\"}",
        WireFormat::DoneError,
    )
    .await;
}

#[tokio::test]
async fn test_malformed_line() {
    assert_segmentation_invariant(
        "{\"content\":\"a\"}\n{\"content\":\"b\"\n{\"content\":\"c\"}\n",
        WireFormat::DoneError,
    )
    .await;
}

#[tokio::test]
async fn test_unterminated_final_frame() {
    assert_segmentation_invariant(
        "{\"content\":\"a\"}\n{\"content\":\"ç\"}",
        WireFormat::DoneError,
    )
    .await;
}

#[tokio::test]
async fn test_success_format() {
    assert_segmentation_invariant(
        "{\"content\":\"x\"}\n{\"content\":\"✓\"}\n{\"success\":false}\n",
        WireFormat::Success,
    )
    .await;
}
