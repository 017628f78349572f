pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod remote;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use taskboard_core::TaskBoard;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting taskboard CLI"
  );

  let mut cfg = config::Config::load(
    cli.taskboardrc.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );
  debug!(files = ?cfg.loaded_files, "configuration ready");

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let store =
    datastore::FileStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open store at {}",
        data_dir.display()
      )
    })?;

  let api = remote::HttpApi::new(
    &cfg.api_url(),
    cfg.api_timeout()?
  )?;
  info!(
    api = %api.endpoints().collection(),
    "using task API"
  );

  let renderer =
    render::Renderer::new(&cfg);
  let board = TaskBoard::with_options(
    api,
    store,
    cfg.board_options()
  );
  let command =
    cli.command.unwrap_or_default();

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async \
         runtime"
      )?;

  let mut out = std::io::stdout().lock();
  runtime.block_on(commands::dispatch(
    &board,
    &renderer,
    command,
    &mut out
  ))?;

  info!("done");
  Ok(())
}
