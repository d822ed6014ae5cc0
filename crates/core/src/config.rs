pub const DEFAULT_URL: &str = "oracle:thin:@localhost:1521:orcl";
pub const DEFAULT_USER: &str = "system";
pub const DEFAULT_PASSWORD: &str = "manager";

/// Startup settings: where the first connection goes and how output looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub user: String,
    pub password: String,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            color: true,
        }
    }
}
