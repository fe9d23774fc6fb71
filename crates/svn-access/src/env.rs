/// The environment variable key for the forge's numeric repository id.
pub const GITEA_REPO_ID: &str = "GITEA_REPO_ID";
/// The environment variable key for whether the repository is a wiki.
/// Always `"false"` in this slice: wikis are out of scope.
pub const GITEA_REPO_IS_WIKI: &str = "GITEA_REPO_IS_WIKI";
/// The environment variable key for the repository's name.
pub const GITEA_REPO_NAME: &str = "GITEA_REPO_NAME";
/// The environment variable key for the pushing user's login.
pub const GITEA_REPO_USER: &str = "GITEA_REPO_USER";
/// The environment variable key for the command the hook was invoked
/// under. Always `"git"` in this slice.
pub const SSH_ORIGINAL_COMMAND: &str = "SSH_ORIGINAL_COMMAND";
/// The environment variable key for the pushing user's email, when known.
pub const GITEA_PUSHER_EMAIL: &str = "GITEA_PUSHER_EMAIL";
/// The environment variable key for the pushing user's numeric id, when
/// known.
pub const GITEA_PUSHER_ID: &str = "GITEA_PUSHER_ID";
/// The environment variable key for the deploy key id used to push, when
/// the push was authenticated via a deploy key rather than a user.
pub const GITEA_DEPLOY_KEY_ID: &str = "GITEA_DEPLOY_KEY_ID";

/// Assembles the fixed set of environment entries the adapter contributes
/// to the child process that invokes Git hooks on a write.
///
/// This exists so call sites build the environment through a single typed
/// path rather than scattering `GITEA_*` string literals across the
/// adapter; the keys themselves are exactly the contract constants above.
#[derive(Clone, Debug, Default)]
pub struct HookEnv {
    repo_id: u64,
    repo_name: String,
    user: String,
    pusher_email: Option<String>,
    pusher_id: Option<u64>,
    deploy_key_id: Option<u64>,
}

impl HookEnv {
    /// Starts a builder for the required fields; the optional pusher
    /// fields default to absent.
    pub fn new(repo_id: u64, repo_name: impl Into<String>, user: impl Into<String>) -> HookEnv {
        HookEnv {
            repo_id,
            repo_name: repo_name.into(),
            user: user.into(),
            pusher_email: None,
            pusher_id: None,
            deploy_key_id: None,
        }
    }

    /// Attaches the pushing user's email, if known.
    pub fn pusher_email(mut self, email: impl Into<String>) -> HookEnv {
        self.pusher_email = Some(email.into());
        self
    }

    /// Attaches the pushing user's numeric id, if known.
    pub fn pusher_id(mut self, id: u64) -> HookEnv {
        self.pusher_id = Some(id);
        self
    }

    /// Attaches the deploy key id used to authenticate the push, if the
    /// push came in via a deploy key rather than a user account.
    pub fn deploy_key_id(mut self, id: u64) -> HookEnv {
        self.deploy_key_id = Some(id);
        self
    }

    /// Renders this builder to the `(key, value)` pairs suitable for
    /// `std::process::Command::envs`.
    pub fn to_vec(&self) -> Vec<(String, String)> {
        let mut out = vec![
            (GITEA_REPO_ID.to_string(), self.repo_id.to_string()),
            (GITEA_REPO_IS_WIKI.to_string(), "false".to_string()),
            (GITEA_REPO_NAME.to_string(), self.repo_name.clone()),
            (GITEA_REPO_USER.to_string(), self.user.clone()),
            (SSH_ORIGINAL_COMMAND.to_string(), "git".to_string()),
        ];
        if let Some(ref email) = self.pusher_email {
            out.push((GITEA_PUSHER_EMAIL.to_string(), email.clone()));
        }
        if let Some(id) = self.pusher_id {
            out.push((GITEA_PUSHER_ID.to_string(), id.to_string()));
        }
        if let Some(id) = self.deploy_key_id {
            out.push((GITEA_DEPLOY_KEY_ID.to_string(), id.to_string()));
        }
        out
    }
}
