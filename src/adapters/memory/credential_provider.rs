use crate::ports::credential_provider::{
    CredentialProvider as CredentialProviderTrait, Principal, Result, Role,
};
use async_trait::async_trait;
use std::collections::HashMap;

struct UserRecord {
    password: String,
    roles: Vec<Role>,
}

/// 設定から与えられた利用者で照合するCredentialProvider実装
///
/// 起動時に利用者を登録し、以後は読み取り専用。
pub struct CredentialProvider {
    users: HashMap<String, UserRecord>,
}

impl CredentialProvider {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// 利用者を登録する（同名の利用者は上書き）
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        roles: Vec<Role>,
    ) -> Self {
        self.users.insert(
            username.into(),
            UserRecord {
                password: password.into(),
                roles,
            },
        );
        self
    }
}

impl Default for CredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProviderTrait for CredentialProvider {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Principal>> {
        let principal = self
            .users
            .get(username)
            .filter(|record| record.password == password)
            .map(|record| Principal {
                username: username.to_string(),
                roles: record.roles.clone(),
            });
        Ok(principal)
    }
}
