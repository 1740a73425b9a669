//! Leaf certificate connector
//!
//! Performs a TLS handshake and captures the certificate the peer presents.
//! Peer verification is disabled so that self-signed, internally issued and
//! intercepted certificates can still be collected.

use crate::checks::certificate::parse_certificate;
use crate::config::ConnectSettings;
use crate::models::Certificate;
use crate::utils::ChainError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::future::Future;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::net::TcpStream;

/// A certificate verifier that accepts any certificate.
#[derive(Debug)]
struct AcceptAnyCertVerifier;

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// Supplies the leaf certificate for `host:port`
pub trait LeafSource {
    fn fetch_leaf_certificate(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = Result<Certificate, ChainError>> + Send;
}

/// Fetches the leaf certificate a host presents during the TLS handshake
pub struct LeafConnector {
    settings: ConnectSettings,
}

impl LeafConnector {
    /// Create a new connector with the given settings
    pub fn new(settings: ConnectSettings) -> Self {
        // Ensure a default crypto provider is installed (needed when multiple
        // providers are available, e.g. when reqwest enables aws-lc-rs)
        let _ = rustls::crypto::ring::default_provider().install_default();
        Self { settings }
    }
}

impl LeafSource for LeafConnector {
    /// Connect to `host:port` once and return the peer's leaf certificate
    async fn fetch_leaf_certificate(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Certificate, ChainError> {
        let addr = tokio::net::lookup_host((host, port))
            .await
            .map_err(|_| network(format!("Hostname could not be resolved: {}", host)))?
            .next()
            .ok_or_else(|| network(format!("Hostname could not be resolved: {}", host)))?;

        let stream = tokio::time::timeout(self.settings.connect_timeout(), TcpStream::connect(addr))
            .await
            .map_err(|_| network(format!("Connection timed out to {}:{}", host, port)))?
            .map_err(|e| match e.kind() {
                ErrorKind::ConnectionRefused => {
                    network(format!("Connection refused to {}:{}", host, port))
                }
                ErrorKind::TimedOut => network(format!("Connection timed out to {}:{}", host, port)),
                _ => network(format!("Failed to connect to {}:{}: {}", host, port, e)),
            })?;

        let server_name = ServerName::try_from(host.to_string())
            .map_err(|_| network(format!("Invalid server name: {}", host)))?;

        let config = ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertVerifier))
            .with_no_client_auth();
        let connector = tokio_rustls::TlsConnector::from(Arc::new(config));

        let tls_stream = tokio::time::timeout(
            self.settings.handshake_timeout(),
            connector.connect(server_name, stream),
        )
        .await
        .map_err(|_| network(format!("TLS handshake timed out with {}:{}", host, port)))?
        .map_err(|e| network(format!("SSL error: {}", e)))?;

        let (_, client_connection) = tls_stream.get_ref();
        let leaf_der = client_connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .map(|cert| cert.as_ref().to_vec())
            .ok_or_else(|| network(format!("No certificate presented by {}:{}", host, port)))?;

        tracing::debug!("Received {} byte leaf certificate from {}:{}", leaf_der.len(), host, port);

        parse_certificate(&leaf_der)
    }
}

fn network(reason: String) -> ChainError {
    ChainError::Network { reason }
}
