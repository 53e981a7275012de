use tokio::time::{sleep, timeout, Duration, Instant};
use tracing::debug;

use crate::domain::model::readiness::{ReadinessPolicy, Strategy};
use crate::domain::ports::secondary::cluster::{Cluster, Error as ClusterError};

/// The cluster did not answer within the policy window.
#[derive(Debug)]
pub struct NotReady {
    pub waited: Duration,
    pub attempts: u32,
    pub last_error: ClusterError,
}

/// Waits for the cluster to answer a ping, following the policy.
///
/// Returns the time elapsed until the first successful ping. With the poll
/// strategy every ping is cut short at the deadline, so the wait never ends
/// later than `timeout` after the call.
pub async fn wait_until_ready<C>(cluster: &C, policy: &ReadinessPolicy) -> Result<Duration, NotReady>
where
    C: Cluster + ?Sized,
{
    let start = Instant::now();
    match policy.strategy {
        Strategy::Fixed => {
            debug!("blind wait of {:?} before probing", policy.fixed_wait);
            sleep(policy.fixed_wait).await;
            cluster
                .ping()
                .await
                .map(|_| start.elapsed())
                .map_err(|err| NotReady {
                    waited: start.elapsed(),
                    attempts: 1,
                    last_error: err,
                })
        }
        Strategy::Poll => {
            let deadline = start + policy.timeout;
            sleep(policy.initial_delay).await;
            let mut attempts = 0;
            loop {
                attempts += 1;
                let remaining = deadline.saturating_duration_since(Instant::now());
                let ping = match timeout(remaining, cluster.ping()).await {
                    Ok(ping) => ping,
                    Err(_) => Err(ClusterError::Unreachable {
                        url: cluster.url().to_string(),
                        details: format!("no answer within {:?}", policy.timeout),
                    }),
                };
                match ping {
                    Ok(()) => return Ok(start.elapsed()),
                    Err(err) => {
                        if Instant::now() + policy.interval > deadline {
                            return Err(NotReady {
                                waited: start.elapsed(),
                                attempts,
                                last_error: err,
                            });
                        }
                        debug!("attempt {} failed: {}", attempts, err);
                        sleep(policy.interval).await;
                    }
                }
            }
        }
    }
}
