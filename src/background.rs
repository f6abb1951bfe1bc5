use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, info_span, Instrument};
use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops wizard sessions nobody has touched within the
/// configured TTL. Their pending autosaves are cancelled with them; anything
/// already committed stays in the draft cache or collection.
pub async fn start_session_reaper(state: Arc<AppState>) {
    info!("Starting wizard session reaper (ttl {:?})...", state.config.session_ttl);

    loop {
        sleep(SWEEP_INTERVAL).await;
        sweep_once(&state)
            .instrument(info_span!("session_sweep"))
            .await;
    }
}

pub async fn sweep_once(state: &AppState) -> usize {
    let evicted = state.sessions.evict_idle(state.config.session_ttl).await;
    if evicted > 0 {
        info!("Evicted {} idle wizard sessions", evicted);
    } else {
        debug!("No idle wizard sessions");
    }
    evicted
}
