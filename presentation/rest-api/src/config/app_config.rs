use super::{
    cors_config, nougat_config::NougatConfig, openai_config::OpenAIConfig,
    server_config::ServerConfig, workspace_config::WorkspaceConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub openai: OpenAIConfig,
    pub nougat: NougatConfig,
    pub workspace: WorkspaceConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            cors: cors_config::init_cors(),
            openai: OpenAIConfig::from_env()?,
            nougat: NougatConfig::from_env()?,
            workspace: WorkspaceConfig::from_env()?,
        })
    }
}
