use snafu::{ResultExt, Snafu};
use std::future::Future;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not create the tokio runtime: {}", source))]
    RuntimeCreation { source: std::io::Error },
}

/// Runs the future to completion on a single threaded runtime.
///
/// The workflow is sequential, there is nothing to gain from a thread pool.
pub fn launch_with_runtime<F>(future: F) -> Result<F::Output, Error>
where
    F: Future,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context(RuntimeCreationSnafu)?;
    Ok(runtime.block_on(future))
}
