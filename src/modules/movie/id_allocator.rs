use crate::common::error::{StoreError, StoreResult};
use std::future::Future;
use tracing::{error, warn};
use uuid::Uuid;

/// Upper bound on draws before allocation gives up.
pub const MAX_ATTEMPTS: u32 = 5;

/// Answers whether a candidate id is already taken by a movie.
pub trait IdProbe {
    fn id_exists(&mut self, id: Uuid) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Draws a random v4 id that is not yet used in the store.
pub async fn allocate<P: IdProbe>(probe: &mut P) -> StoreResult<Uuid> {
    allocate_with(probe, Uuid::new_v4).await
}

pub async fn allocate_with<P, G>(probe: &mut P, mut generate: G) -> StoreResult<Uuid>
where
    P: IdProbe,
    G: FnMut() -> Uuid,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let candidate = generate();
        if !probe.id_exists(candidate).await? {
            return Ok(candidate);
        }
        warn!(%candidate, attempt, "movie id already taken, regenerating");
    }

    error!(attempts = MAX_ATTEMPTS, "no free movie id found");
    Err(StoreError::IdSpaceExhausted {
        attempts: MAX_ATTEMPTS,
    })
}
