use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::time::Duration;

use anyhow::{
  Context,
  anyhow,
  bail
};
use taskboard_core::BoardOptions;
use taskboard_core::api::DEFAULT_API_URL;
use tracing::{
  debug,
  info,
  trace,
  warn
};

#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "api.url".to_string(),
      DEFAULT_API_URL.to_string()
    );
    map.insert(
      "data.location".to_string(),
      "~/.taskboard".to_string()
    );
    map.insert(
      "demo.resume".to_string(),
      "off".to_string()
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(
      rc_override
    )?;
    if let Some(path) = rc {
      info!(taskboardrc = %path.display(), "loading taskboardrc");
      cfg.load_file(
        &path,
        &mut Vec::new()
      )?;
    } else {
      debug!(
        "no taskboardrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  pub fn api_url(&self) -> String {
    self
      .get("api.url")
      .unwrap_or_else(|| {
        DEFAULT_API_URL.to_string()
      })
  }

  /// Request timeout. Unset or empty
  /// leaves the transport default.
  pub fn api_timeout(
    &self
  ) -> anyhow::Result<Option<Duration>>
  {
    let Some(raw) =
      self.get("api.timeout")
    else {
      return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
      return Ok(None);
    }

    let secs =
      raw.parse::<u64>().map_err(
        |_| {
          anyhow!(
            "invalid api.timeout \
             '{raw}': expected whole \
             seconds"
          )
        }
      )?;
    Ok(Some(Duration::from_secs(
      secs
    )))
  }

  pub fn board_options(
    &self
  ) -> BoardOptions {
    BoardOptions {
      resume_demo: self
        .get_bool("demo.resume")
        .unwrap_or(false)
    }
  }

  /// Reads one rc file and any files
  /// it includes. `chain` holds the
  /// files currently being read, so an
  /// include back into one of them is
  /// an error rather than a loop.
  #[tracing::instrument(skip(
    self, chain
  ))]
  fn load_file(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let identity = fs::canonicalize(
      &path
    )
    .unwrap_or_else(|_| path.clone());
    if chain.contains(&identity) {
      bail!(
        "include cycle at {}",
        path.display()
      );
    }

    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    self
      .loaded_files
      .push(path.clone());
    chain.push(identity);

    let base_dir = path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (idx, raw_line) in
      text.lines().enumerate()
    {
      let at = || {
        format!(
          "{}:{}",
          path.display(),
          idx + 1
        )
      };
      match RcLine::parse(raw_line)
        .with_context(at)?
      {
        | RcLine::Blank => {}
        | RcLine::Include(target) => {
          let target = include_target(
            &base_dir, target
          )
          .with_context(at)?;
          if target.exists() {
            debug!(include = %target.display(), line = idx + 1, "processing include");
            self
              .load_file(&target, chain)?;
          } else {
            warn!(include = %target.display(), "include file does not exist; skipping");
          }
        }
        | RcLine::Setting(key, value) => {
          trace!(key, value, "loaded config key");
          self.map.insert(
            key.to_string(),
            value.to_string()
          );
        }
      }
    }

    chain.pop();
    Ok(())
  }
}

/// One meaningful line of an rc file.
#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Blank,
  Include(&'a str),
  Setting(&'a str, &'a str)
}

impl<'a> RcLine<'a> {
  fn parse(
    raw: &'a str
  ) -> anyhow::Result<Self> {
    let line = raw
      .split_once('#')
      .map_or(raw, |(before, _)| before)
      .trim();
    if line.is_empty() {
      return Ok(Self::Blank);
    }
    if let Some(target) =
      line.strip_prefix("include ")
    {
      return Ok(Self::Include(
        target.trim()
      ));
    }
    match line.split_once('=') {
      | Some((key, value))
        if !key.trim().is_empty() =>
      {
        Ok(Self::Setting(
          key.trim(),
          value.trim()
        ))
      }
      | _ => {
        bail!(
          "invalid config line: {raw}"
        )
      }
    }
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.get("data.location")
  {
    expand_tilde(Path::new(&cfg_value))
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var("TASKBOARDRC")
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping \
       taskboardrc lookup"
    );
    return Ok(None);
  };
  let candidate =
    home.join(".taskboardrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  Ok(home.join(".taskboard"))
}

fn include_target(
  base_dir: &Path,
  target: &str
) -> anyhow::Result<PathBuf> {
  if target.is_empty() {
    bail!("include path cannot be empty");
  }
  let expanded =
    expand_tilde(Path::new(target));
  Ok(if expanded.is_absolute() {
    expanded
  } else {
    base_dir.join(expanded)
  })
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}
