//! rustls client configuration for TLS dials

use std::sync::Arc;

use rustls::pki_types::CertificateDer;
use rustls::{ClientConfig, RootCertStore};
use tracing::{debug, warn};

use super::insecure::AcceptAnyCertificate;
use crate::config::TlsTrust;
use crate::error::{self, Result};

/// Build the shared client configuration for `trust`.
///
/// `Verify` trusts the bundled web PKI roots, the platform store and any
/// `extra_roots`. `Insecure` skips chain and name checks but still verifies
/// handshake signatures.
///
/// # Errors
///
/// Returns a `Tls` error if the crypto provider supports no safe protocol
/// version, or if `Verify` ends up with an empty root store.
pub fn client_config(trust: TlsTrust, extra_roots: &[CertificateDer<'static>]) -> Result<Arc<ClientConfig>> {
    // Pin the provider so builds enabling several rustls backends don't
    // panic on an ambiguous process default.
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(error::tls)?;

    let config = match trust {
        TlsTrust::Verify => builder
            .with_root_certificates(root_store(extra_roots)?)
            .with_no_client_auth(),
        TlsTrust::Insecure => {
            warn!("TLS certificate verification disabled");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate::new(provider)))
                .with_no_client_auth()
        }
    };

    Ok(Arc::new(config))
}

fn root_store(extra_roots: &[CertificateDer<'static>]) -> Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let native = rustls_native_certs::load_native_certs();
    for err in &native.errors {
        debug!("Certificate load error: {}", err);
    }
    let (added, ignored) = roots.add_parsable_certificates(native.certs);
    debug!("Loaded {} system certificates ({} ignored)", added, ignored);

    for cert in extra_roots {
        roots.add(cert.clone()).map_err(error::tls)?;
    }

    if roots.is_empty() {
        return Err(error::tls("no trusted root certificates available"));
    }
    Ok(roots)
}
