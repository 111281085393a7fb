use crate::error::{AppError, Result};
use crate::models::DistanceTable;
use crate::services::providers::DistanceProvider;
use futures::stream::{self, StreamExt};

/// Ids per batch so that any batch pair stays within `max_elements`.
///
/// `b = min(max_elements / n, n)` gives `b * b <= max_elements`. When `n`
/// exceeds the ceiling the quotient is zero, so the size is clamped to 1.
pub fn batch_size(n: usize, max_elements: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (max_elements / n).min(n).max(1)
}

/// Every ordered `(origin_batch, destination_batch)` pair, self-pairs included.
pub fn batch_pairs(batch_count: usize) -> Vec<(usize, usize)> {
    (0..batch_count)
        .flat_map(|i| (0..batch_count).map(move |j| (i, j)))
        .collect()
}

/// Aggregates a sparse distance table from batched provider queries.
pub struct DistanceMatrixBuilder<'a> {
    provider: &'a dyn DistanceProvider,
    concurrency: usize,
}

impl<'a> DistanceMatrixBuilder<'a> {
    pub fn new(provider: &'a dyn DistanceProvider, concurrency: usize) -> Self {
        DistanceMatrixBuilder {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Query every batch pair and merge the rows by origin id.
    ///
    /// Failed pairs are logged and skipped; their cells stay missing. Fails
    /// only when no pair produced any row.
    pub async fn build(&self, ids: &[String]) -> Result<DistanceTable> {
        let size = batch_size(ids.len(), self.provider.max_elements());
        let batches: Vec<&[String]> = if size == 0 {
            Vec::new()
        } else {
            ids.chunks(size).collect()
        };
        let pairs = batch_pairs(batches.len());
        let pair_count = pairs.len();

        tracing::debug!(
            ids = ids.len(),
            batch_size = size,
            batches = batches.len(),
            requests = pair_count,
            "Building distance table"
        );

        let provider = self.provider;
        let results: Vec<_> = stream::iter(pairs)
            .map(|(i, j)| {
                let origins = batches[i];
                let destinations = batches[j];
                async move { (i, j, provider.distance_rows(origins, destinations).await) }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut table = DistanceTable::new();
        let mut failed = 0;

        for (i, j, result) in results {
            match result {
                Ok(rows) => {
                    if rows.len() != batches[i].len() {
                        tracing::warn!(
                            origin_batch = i,
                            destination_batch = j,
                            "Distance batch returned {} rows for {} origins",
                            rows.len(),
                            batches[i].len()
                        );
                    }
                    for (origin, row) in batches[i].iter().zip(rows) {
                        table.merge_row(origin, batches[j].iter().cloned().zip(row.elements));
                    }
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(
                        origin_batch = i,
                        destination_batch = j,
                        "Distance batch failed, continuing without it: {}",
                        e
                    );
                }
            }
        }

        tracing::info!(
            "Distance table complete: {}/{} batch requests successful, {} origins, {} cells",
            pair_count - failed,
            pair_count,
            table.origin_count(),
            table.element_count()
        );

        if table.is_empty() {
            return Err(AppError::NoDistanceData(
                "No distances found between the spots".to_string(),
            ));
        }

        Ok(table)
    }
}
