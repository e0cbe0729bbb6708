use std::fmt::{Display, Formatter};
use std::net::ToSocketAddrs;
use std::time::Duration;

use suppaftp::FtpStream;
use tracing::debug;

/// Single-file anonymous FTP retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpRequest {
    pub host: String,
    pub port: u16,
    /// Remote path passed to `RETR`.
    pub path: String,
    pub user: String,
    pub password: String,
    pub timeout_ms: u64,
}

impl FtpRequest {
    pub fn anonymous(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 21,
            path: path.into(),
            user: String::from("anonymous"),
            password: String::from("example@example.com"),
            timeout_ms: 60_000,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// `host/path`, for log messages.
    pub fn location(&self) -> String {
        format!("{}/{}", self.host, self.path)
    }
}

/// Transport-level FTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpError {
    message: String,
    retryable: bool,
    disabled: bool,
}

impl FtpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
            disabled: false,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
            disabled: false,
        }
    }

    /// Error of a transport with network access switched off.
    pub fn disabled(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
            disabled: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Display for FtpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FtpError {}

/// Blocking FTP transport contract.
pub trait FtpClient: Send + Sync {
    fn retrieve(&self, request: &FtpRequest) -> Result<Vec<u8>, FtpError>;
}

/// Transport for offline operation: every retrieval fails.
#[derive(Debug, Default)]
pub struct NoopFtpClient;

impl FtpClient for NoopFtpClient {
    fn retrieve(&self, request: &FtpRequest) -> Result<Vec<u8>, FtpError> {
        Err(FtpError::disabled(format!(
            "network access disabled; not fetching {}",
            request.location()
        )))
    }
}

/// Production FTP client built on `suppaftp` (passive mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppaFtpClient;

impl FtpClient for SuppaFtpClient {
    fn retrieve(&self, request: &FtpRequest) -> Result<Vec<u8>, FtpError> {
        let addr = (request.host.as_str(), request.port)
            .to_socket_addrs()
            .map_err(|e| FtpError::new(format!("cannot resolve {}: {e}", request.host)))?
            .next()
            .ok_or_else(|| FtpError::new(format!("no address for {}", request.host)))?;

        let timeout = Duration::from_millis(request.timeout_ms.max(1));
        let mut ftp = FtpStream::connect_timeout(addr, timeout)
            .map_err(|e| FtpError::new(format!("connection failed: {e}")))?;
        // Bounds every later command and reply on the control connection.
        let control = ftp.get_ref();
        control
            .set_read_timeout(Some(timeout))
            .and_then(|()| control.set_write_timeout(Some(timeout)))
            .map_err(|e| FtpError::new(format!("cannot set socket timeout: {e}")))?;

        ftp.login(&request.user, &request.password)
            .map_err(|e| FtpError::non_retryable(format!("login rejected: {e}")))?;

        let contents = ftp
            .retr_as_buffer(&request.path)
            .map_err(|e| FtpError::new(format!("RETR {} failed: {e}", request.path)))?
            .into_inner();

        // The file is already in hand; a failed QUIT does not invalidate it.
        if let Err(error) = ftp.quit() {
            debug!(host = %request.host, %error, "ftp quit failed");
        }

        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_request_defaults() {
        let request = FtpRequest::anonymous("ftp.example.test", "pub/indices/events/x.txt")
            .with_port(2121)
            .with_timeout_ms(250);

        assert_eq!(request.user, "anonymous");
        assert_eq!(request.port, 2121);
        assert_eq!(request.location(), "ftp.example.test/pub/indices/events/x.txt");
    }

    #[test]
    fn noop_client_refuses_every_request() {
        let error = NoopFtpClient
            .retrieve(&FtpRequest::anonymous("ftp.example.test", "a.txt"))
            .expect_err("offline transport must fail");
        assert!(!error.retryable());
    }

    #[test]
    fn stalled_server_fails_within_the_timeout() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        std::thread::spawn(move || {
            if let Ok((mut socket, _)) = listener.accept() {
                let _ = std::io::Write::write_all(&mut socket, b"220 ready\r\n");
                std::thread::sleep(Duration::from_secs(10));
            }
        });
        let request = FtpRequest::anonymous("127.0.0.1", "x.txt")
            .with_port(port)
            .with_timeout_ms(200);

        let started = std::time::Instant::now();
        let result = SuppaFtpClient.retrieve(&request);

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
