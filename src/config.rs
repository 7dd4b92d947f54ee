use std::path::PathBuf;

#[cfg(windows)]
const DEFAULT_ROOT: &str = "D:\\";
#[cfg(not(windows))]
const DEFAULT_ROOT: &str = "/";

#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port (the server binds 0.0.0.0)
    pub port: u16,

    /// Default root directory shown when no path is requested
    pub root_dir: PathBuf,

    /// Basic-auth credential pair, shared by every request
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Self {
        Self::from_sources(std::env::args())
    }

    /// Environment first, then `--flag=value` overrides from `args`.
    fn from_sources(args: impl Iterator<Item = String>) -> Self {
        let mut port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(81);
        let mut root_dir = PathBuf::from(
            std::env::var("ROOT_DIR").unwrap_or_else(|_| DEFAULT_ROOT.to_string()),
        );
        let mut username =
            std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let mut password = std::env::var("ADMIN_PASS").ok();

        for arg in args {
            if arg.starts_with("--port=") {
                if let Ok(p) = arg.trim_start_matches("--port=").parse::<u16>() {
                    port = p;
                }
            } else if arg.starts_with("--root=") {
                root_dir = PathBuf::from(arg.trim_start_matches("--root="));
            } else if arg.starts_with("--user=") {
                username = arg.trim_start_matches("--user=").to_string();
            } else if arg.starts_with("--pass=") {
                password = Some(arg.trim_start_matches("--pass=").to_string());
            }
        }

        let password = match password {
            Some(p) => {
                let masked = if p.len() > 4 {
                    format!("{}****", &p[..2])
                } else {
                    "****".to_string()
                };
                println!("Password loaded from environment/args: {}", masked);
                p
            }
            None => {
                let generated = crate::utils::common::generate_password();
                println!(
                    "No password provided. Generated temporary password: {}",
                    generated
                );
                generated
            }
        };

        Config {
            port,
            root_dir,
            username,
            password,
        }
    }

    /// Default destination for uploads when the form carries no directory.
    pub fn upload_dir(&self) -> PathBuf {
        self.root_dir.join("uploads")
    }
}
