//! Property tests for disk vector store search ordering.

use std::collections::HashMap;

use mnemo_rag::document::{Document, StoredRecord};
use mnemo_rag::disk::DiskVectorStore;
use mnemo_rag::vectorstore::VectorStore;
use proptest::prelude::*;

const DIM: usize = 16;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a stored record with a normalized embedding.
fn arb_record(dim: usize) -> impl Strategy<Value = StoredRecord> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| StoredRecord {
            document: Document { id, text, metadata: HashMap::new() },
            embedding,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any set of persisted records, searching returns results ordered by
    /// descending cosine similarity, bounded by `top_k` and by the number of
    /// distinct document IDs stored.
    #[test]
    fn search_results_ordered_descending_and_bounded_by_top_k(
        records in proptest::collection::vec(arb_record(DIM), 1..20),
        query in arb_normalized_embedding(DIM),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, unique_count) = rt.block_on(async {
            let temp = tempfile::tempdir().unwrap();
            let store = DiskVectorStore::new(temp.path());

            // Upsert replaces records with duplicate document IDs.
            let mut distinct: HashMap<String, ()> = HashMap::new();
            for record in &records {
                distinct.insert(record.document.id.clone(), ());
            }

            store.upsert("agents", &records).await.unwrap();
            let results = store.search("agents", &query, top_k).await.unwrap();
            (results, distinct.len())
        });

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= unique_count);

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}
