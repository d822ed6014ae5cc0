use tracing::{debug, info, warn};

use crate::config::Config;
use crate::driver::{Connection, Driver};
use crate::error::{ConnectionError, FormatError, ReconnectError, StatementError};

/// The parts of `user/password@host:port:sid`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ConnectSpec {
    pub user: String,
    pub password: String,
    pub target: String,
}

impl ConnectSpec {
    pub fn parse(spec: &str) -> Result<ConnectSpec, FormatError> {
        let (credentials, target) = split_once_exactly(spec.trim(), '@').ok_or(FormatError::At)?;
        let (user, password) = split_once_exactly(credentials, '/').ok_or(FormatError::Slash)?;

        for (part, name) in [(user, "user"), (password, "password"), (target, "host")] {
            if part.is_empty() {
                return Err(FormatError::EmptyPart(name));
            }
        }

        Ok(ConnectSpec {
            user: user.to_string(),
            password: password.to_string(),
            target: target.to_string(),
        })
    }

    /// `target` used verbatim behind the driver's scheme.
    pub fn url(&self, scheme: &str) -> String {
        format!("{scheme}{}", self.target)
    }
}

fn split_once_exactly(text: &str, separator: char) -> Option<(&str, &str)> {
    let (left, right) = text.split_once(separator)?;
    if right.contains(separator) {
        None
    } else {
        Some((left, right))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Status {
    NotConnected,
    Connected {
        open: bool,
        url: String,
        user: String,
        autocommit: bool,
    },
}

/// The one database session of the process.
pub struct Session<D: Driver> {
    driver: D,
    connection: Option<D::Connection>,
    url: String,
    user: String,
    password: String,
}

impl<D: Driver> Session<D> {
    /// A disconnected session remembering the configured credentials.
    pub fn new(driver: D, config: &Config) -> Self {
        Session {
            driver,
            connection: None,
            url: config.url.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn connection(&self) -> Option<&D::Connection> {
        self.connection.as_ref()
    }

    /// Connect with the credentials the session already holds.
    pub fn open(&mut self) -> Result<(), ConnectionError> {
        let (url, user, password) = (self.url.clone(), self.user.clone(), self.password.clone());
        self.connect(&url, &user, &password)
    }

    /// Replace the current connection. The old one is closed before the new
    /// one is attempted, so a failure leaves the session disconnected.
    pub fn connect(&mut self, url: &str, user: &str, password: &str) -> Result<(), ConnectionError> {
        self.close();

        debug!(url, user, "connecting");
        let connection = self.driver.connect(url, user, password)?;
        info!(url, user, "connected");

        self.connection = Some(connection);
        self.url = url.to_string();
        self.user = user.to_string();
        self.password = password.to_string();
        Ok(())
    }

    /// Handle `conn user/password@host:port:sid`. A spec that does not parse
    /// leaves the current connection alone.
    pub fn reconnect(&mut self, spec: &str) -> Result<(), ReconnectError> {
        let spec = ConnectSpec::parse(spec)?;
        let url = spec.url(self.driver.scheme());
        self.connect(&url, &spec.user, &spec.password)?;
        Ok(())
    }

    pub fn status(&self) -> Result<Status, StatementError> {
        let Some(connection) = &self.connection else {
            return Ok(Status::NotConnected);
        };

        Ok(Status::Connected {
            open: !connection.is_closed()?,
            url: self.url.clone(),
            user: self.user.clone(),
            autocommit: connection.autocommit()?,
        })
    }

    /// Close the connection if there is one. Errors from a broken handle are
    /// logged and dropped.
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            match connection.close() {
                Ok(()) => debug!(url = %self.url, "connection closed"),
                Err(e) => warn!(error = %e, "closing connection failed"),
            }
        }
    }
}

impl<D: Driver> Drop for Session<D> {
    fn drop(&mut self) {
        self.close();
    }
}
