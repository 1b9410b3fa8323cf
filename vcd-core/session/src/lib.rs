//! vCloud 会话层
//!
//! 提供与平台交互所需的连接抽象，包括：
//!
//! - **连接抽象** (`Connection`): `get` / `post` / `delete` 三个基础操作
//! - **REST 实现** (`RestConnection`): 基于 reqwest，负责登录与令牌管理
//! - **会话配置** (`SessionConfig`): 默认值、配置文件与环境变量
//!
//! # 示例
//!
//! ```ignore
//! use vcd_session::{RestConnection, SessionConfig};
//!
//! let config = SessionConfig::load()?;
//! let connection = RestConnection::new(config)?;
//! connection.login().await?;
//!
//! let vdc = connection.get("/api/vdc/0a1b2c").await?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod media_type;

pub use config::SessionConfig;
pub use connection::{Connection, RestConnection, AUTH_HEADER};
pub use error::{Result, SessionError};
