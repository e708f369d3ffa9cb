use crate::store::AnswerRecord;
use ndarray::Array1;

/// Cosine similarity between two vectors of equal length. A zero-magnitude
/// vector cannot point anywhere, so it scores -1 and loses to every real
/// candidate instead of dividing by zero.
pub fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        -1.0
    } else {
        a.dot(b) / (norm_a * norm_b)
    }
}

/// Linear scan for the record most similar to `query`. Records whose
/// embedding length differs from the query are ineligible and skipped.
///
/// Tie-break is strictly-greater: the first record reaching the maximum
/// similarity wins, so the result follows corpus iteration order on ties.
/// Returns `None` only when no eligible record exists; a sole candidate is
/// returned no matter how low its similarity.
pub fn find_best<'a, I>(query: &Array1<f32>, corpus: I) -> Option<&'a AnswerRecord>
where
    I: IntoIterator<Item = &'a AnswerRecord>,
{
    let mut best: Option<(f32, &AnswerRecord)> = None;

    for record in corpus {
        if record.answer_embedding.is_empty() || record.answer_embedding.len() != query.len() {
            continue;
        }

        let similarity = cosine_similarity(query, &record.answer_embedding);
        match best {
            Some((top, _)) if similarity <= top => {}
            _ => best = Some((similarity, record)),
        }
    }

    best.map(|(_, record)| record)
}
