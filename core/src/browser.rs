//! Opening the cloud console for a sandbox credential.

use std::{io, sync::Mutex};

use bear_sandbox::{Provider, SandboxCredential};

pub const AZURE_PORTAL_URL: &str = "https://portal.azure.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Website {
    AwsConsole,
    AzurePortal,
}

impl Website {
    pub fn for_provider(provider: Provider) -> Self {
        match provider {
            Provider::Aws => Website::AwsConsole,
            Provider::Azure => Website::AzurePortal,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Sandbox credential is missing {0}")]
    MissingField(&'static str),

    #[error("Failed to open browser at {url}: {source}")]
    Launch {
        url: String,

        #[source]
        source: io::Error,
    },

    #[error("Clipboard access failed: {0}")]
    Clipboard(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest<'a> {
    pub website: Website,
    pub username: &'a str,
    pub password: &'a str,
    pub sandbox_url: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn new(website: Website, username: &'a str, password: &'a str, sandbox_url: &'a str) -> Self {
        Self {
            website,
            username,
            password,
            sandbox_url,
        }
    }

    pub fn from_credential<C: SandboxCredential + ?Sized>(cred: &'a C) -> Self {
        Self::new(
            Website::for_provider(cred.provider()),
            cred.user(),
            cred.password(),
            cred.sandbox_url(),
        )
    }

    /// The page to open: the sandbox URL itself for AWS, the portal for Azure.
    pub fn landing_url(&self) -> &'a str {
        match self.website {
            Website::AwsConsole => self.sandbox_url,
            Website::AzurePortal => AZURE_PORTAL_URL,
        }
    }

    pub fn validate(&self) -> Result<(), LoginError> {
        if self.username.is_empty() {
            return Err(LoginError::MissingField("username"));
        }
        if self.password.is_empty() {
            return Err(LoginError::MissingField("password"));
        }
        if self.sandbox_url.is_empty() {
            return Err(LoginError::MissingField("sandbox URL"));
        }
        Ok(())
    }
}

pub trait BrowserLauncher {
    fn launch(&self, req: &LoginRequest) -> Result<(), LoginError>;
}

/// Opens the default browser and puts the password on the clipboard.
///
/// The clipboard contents are served only while this value is alive.
#[derive(Default)]
pub struct SystemBrowser {
    clipboard: Mutex<Option<arboard::Clipboard>>,
}

impl SystemBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), LoginError> {
        let mut slot = self
            .clipboard
            .lock()
            .map_err(|e| LoginError::Clipboard(e.to_string()))?;
        if slot.is_none() {
            *slot = Some(arboard::Clipboard::new().map_err(|e| LoginError::Clipboard(e.to_string()))?);
        }
        match slot.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| LoginError::Clipboard(e.to_string())),
            None => Ok(()),
        }
    }
}

impl BrowserLauncher for SystemBrowser {
    fn launch(&self, req: &LoginRequest) -> Result<(), LoginError> {
        if let Err(e) = self.copy_to_clipboard(req.password) {
            log::warn!("Password was not copied: {}", e);
        } else {
            log::info!("Password copied to clipboard");
        }
        log::info!("Sign in to {} as '{}'", req.website, req.username);

        let url = req.landing_url();
        open::that(url).map_err(|source| LoginError::Launch {
            url: url.to_owned(),
            source,
        })
    }
}

/// Checks the request is complete, then hands it to `launcher`.
pub fn login(launcher: &dyn BrowserLauncher, req: &LoginRequest) -> Result<(), LoginError> {
    req.validate()?;
    launcher.launch(req)
}

#[cfg(test)]
mod test {
    use super::*;
    use bear_sandbox::{AwsSandboxCredential, AzureSandboxCredential};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        opened: RefCell<Vec<String>>,
    }

    impl BrowserLauncher for Recorder {
        fn launch(&self, req: &LoginRequest) -> Result<(), LoginError> {
            self.opened.borrow_mut().push(req.landing_url().to_owned());
            Ok(())
        }
    }

    #[test]
    fn azure_opens_portal_aws_opens_sandbox_url() {
        let azure = AzureSandboxCredential {
            user: "u".to_owned(),
            password: "p".to_owned(),
            sandbox_url: "https://portal.azure.com/#@t/".to_owned(),
            ..Default::default()
        };
        let aws = AwsSandboxCredential {
            user: "u".to_owned(),
            password: "p".to_owned(),
            sandbox_url: "https://123.signin.aws.amazon.com/console".to_owned(),
            ..Default::default()
        };

        let rec = Recorder::default();
        login(&rec, &LoginRequest::from_credential(&azure)).unwrap();
        login(&rec, &LoginRequest::from_credential(&aws)).unwrap();
        assert_eq!(
            *rec.opened.borrow(),
            [
                AZURE_PORTAL_URL.to_owned(),
                "https://123.signin.aws.amazon.com/console".to_owned()
            ]
        );
    }

    #[test]
    fn incomplete_credential_never_launches() {
        let rec = Recorder::default();
        let cases = [
            (LoginRequest::new(Website::AzurePortal, "", "p", "u"), "username"),
            (LoginRequest::new(Website::AzurePortal, "n", "", "u"), "password"),
            (LoginRequest::new(Website::AwsConsole, "n", "p", ""), "sandbox URL"),
        ];
        for (req, missing) in cases {
            let err = login(&rec, &req).unwrap_err();
            assert!(
                matches!(err, LoginError::MissingField(f) if f == missing),
                "{:?}",
                err
            );
        }
        assert!(rec.opened.borrow().is_empty());
    }
}
