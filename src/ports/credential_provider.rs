use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

/// 認証済みの利用者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// 認証情報プロバイダーポート
///
/// 資格情報の保存場所や照合方法を境界層から切り離す。
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// 資格情報を照合する
    ///
    /// 一致しない場合は`Ok(None)`を返す。
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Principal>>;
}
