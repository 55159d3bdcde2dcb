//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use console::Term;
use ipswich_auth::{PasswordHasher, User};
use ipswich_cache::{Cache, SessionId};
use ipswich_commerce::cart::Cart;
use ipswich_commerce::session::CartSessions;
use ipswich_commerce::storefront::Storefront;
use ipswich_db::Database;
use ipswich_observability::{LogLevel, LoggingConfig};

use crate::config::CliConfig;
use crate::output::Output;

/// Cache key remembering the session used when `--session` is not given.
const CURRENT_SESSION_KEY: &str = "cli:current_session";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Directory that relative data paths resolve against.
    pub root: PathBuf,
    /// Store database.
    pub db: Database,
    /// Session carts.
    pub carts: CartSessions,
    /// Current browsing session.
    pub session_id: SessionId,
    /// Password hashing parameters.
    pub hasher: PasswordHasher,
    cache: Cache,
    cache_path: PathBuf,
}

impl Context {
    /// Load context from config file and open the store.
    pub fn load(
        config_path: Option<&str>,
        env: Option<&str>,
        session: Option<&str>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let root = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (CliConfig::load(path)?, root)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };

        let data_path = resolve(&root, &config.store.data_file);
        let cache_path = resolve(&root, &config.store.session_file);
        ensure_parent(&data_path)?;
        ensure_parent(&cache_path)?;

        let db = Database::open(&data_path)
            .with_context(|| format!("Failed to open store at {}", data_path.display()))?;
        let cache = Cache::open(&cache_path)
            .with_context(|| format!("Failed to open sessions at {}", cache_path.display()))?;
        let carts = CartSessions::new(cache.clone()).with_currency(config.store.currency);
        let session_id = current_session(&cache, session)?;

        output.debug(&format!("store: {}", data_path.display()));
        output.debug(&format!("sessions: {}", cache_path.display()));
        output.debug(&format!("session: {}", session_id));

        Ok(Self {
            config,
            output,
            root,
            db,
            carts,
            session_id,
            hasher: PasswordHasher::new(),
            cache,
            cache_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let config_names = ["ipswich.toml", ".ipswich.toml", "ipswich.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, current));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Logging settings, raised to debug by `--verbose`.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut logging = self.config.logging;
        if self.output.is_verbose() && logging.level > LogLevel::Debug {
            logging.level = LogLevel::Debug;
        }
        logging
    }

    /// Storefront over the store database.
    pub fn storefront(&self) -> Storefront<&Database> {
        Storefront::new(&self.db)
    }

    /// The current session's cart.
    pub fn load_cart(&self) -> Result<Cart> {
        Ok(self.carts.load(&self.session_id)?)
    }

    /// Store the cart and write the session file.
    pub fn save_cart(&self, cart: &Cart) -> Result<()> {
        self.carts.save(cart)?;
        self.cache
            .save(&self.cache_path)
            .with_context(|| format!("Failed to write {}", self.cache_path.display()))
    }

    /// Sign a customer in, prompting for the password if none was given.
    pub fn login(&self, username: &str, password: Option<&str>) -> Result<User> {
        let password = match password {
            Some(p) => p.to_string(),
            None => self.prompt_password()?,
        };
        let user = self
            .db
            .authenticate(&self.hasher, username, &password)
            .context("Sign-in failed")?;
        tracing::debug!(username, "signed in");
        self.output.debug(&format!("signed in as {}", user.display_name()));
        Ok(user)
    }

    /// Read a password from the terminal without echo.
    pub fn prompt_password(&self) -> Result<String> {
        let term = Term::stderr();
        if !term.is_term() {
            bail!("No password given and no terminal to prompt on (use --password)");
        }
        term.write_str("Password: ")?;
        let password = term.read_secure_line()?;
        Ok(password)
    }
}

/// The session named on the command line, or the remembered one.
///
/// Without either, a fresh id is generated and remembered; it reaches disk
/// with the next cart save.
fn current_session(cache: &Cache, requested: Option<&str>) -> Result<SessionId> {
    if let Some(id) = requested {
        return Ok(SessionId::new(id));
    }
    if let Some(id) = cache.get::<SessionId>(CURRENT_SESSION_KEY)? {
        return Ok(id);
    }
    let id = SessionId::generate();
    cache.set(CURRENT_SESSION_KEY, &id)?;
    tracing::debug!(session = %id, "started new session");
    Ok(id)
}

/// Resolve a path relative to `root`.
fn resolve(root: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        root.join(path)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
