use contracts::domain::a001_order::Order;
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const ORDERS_TABLE: &str = "orders";

/// Lazily loaded value dropped on invalidation.
///
/// Each invalidation bumps a generation counter. A value loaded under an
/// older generation is never served.
pub struct Cached<T> {
    generation: AtomicU64,
    slot: RwLock<Option<(u64, Arc<T>)>>,
}

impl<T> Cached<T> {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            slot: RwLock::new(None),
        }
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn get_or_load<F, Fut>(&self, loader: F) -> anyhow::Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let generation = self.generation.load(Ordering::SeqCst);
        {
            let slot = self.slot.read().await;
            if let Some((loaded_at, value)) = slot.as_ref() {
                if *loaded_at == generation {
                    return Ok(value.clone());
                }
            }
        }

        let value = Arc::new(loader().await?);
        {
            let mut slot = self.slot.write().await;
            *slot = Some((generation, value.clone()));
        }
        Ok(value)
    }
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every row of the orders table (active and defective)
static ORDER_CACHE: Lazy<Cached<Vec<Order>>> = Lazy::new(Cached::new);

pub async fn all_orders() -> anyhow::Result<Arc<Vec<Order>>> {
    ORDER_CACHE
        .get_or_load(|| async {
            tracing::debug!("Reloading order cache");
            crate::domain::a001_order::repository::list_all().await
        })
        .await
}

/// Orders shown on the dashboard: not defective
pub async fn active_orders() -> anyhow::Result<Vec<Order>> {
    Ok(all_orders()
        .await?
        .iter()
        .filter(|o| !o.is_defective)
        .cloned()
        .collect())
}

pub fn invalidate_orders() {
    ORDER_CACHE.invalidate();
}
