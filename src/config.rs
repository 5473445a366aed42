use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub web_port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| crate::Error::Internal("DATABASE_URL must be set".into()))?;
        let web_port = env::var("WEB_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| crate::Error::Internal("WEB_PORT must be a valid port number".into()))?;

        Ok(Self {
            database_url,
            web_port,
        })
    }

    pub fn web_addr(&self) -> String {
        format!("0.0.0.0:{}", self.web_port)
    }
}
