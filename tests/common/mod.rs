//! Synthetic certificate hierarchies and an in-memory issuer fetcher

#![allow(dead_code)]

use rcgen::{
    BasicConstraints, CertificateParams, CustomExtension, DistinguishedName, DnType, IsCa, KeyPair,
};
use ssl_chain::chain::{HttpResponse, IssuerFetcher};
use ssl_chain::Certificate;
use std::collections::HashMap;
use std::sync::Mutex;

const OID_AUTHORITY_INFO_ACCESS: &[u64] = &[1, 3, 6, 1, 5, 5, 7, 1, 1];
const OID_AD_CA_ISSUERS: &[u8] = &[0x06, 0x08, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x02];
const OID_AD_OCSP: &[u8] = &[0x06, 0x08, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01];

/// A generated certificate and the key that can sign its children
pub struct TestCa {
    pub cert: rcgen::Certificate,
    pub key: KeyPair,
}

impl TestCa {
    pub fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }

    pub fn pem(&self) -> String {
        self.cert.pem()
    }

    pub fn parsed(&self) -> Certificate {
        Certificate::from_der(self.cert.der()).unwrap()
    }
}

/// What to put on a generated certificate
#[derive(Default)]
pub struct Profile<'a> {
    pub ca: bool,
    pub ca_issuers: Vec<&'a str>,
    pub ocsp: Option<&'a str>,
}

fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    if content.len() < 0x80 {
        out.push(content.len() as u8);
    } else {
        out.push(0x81);
        out.push(content.len() as u8);
    }
    out.extend_from_slice(content);
    out
}

fn access_description(method: &[u8], uri: &str) -> Vec<u8> {
    let mut body = method.to_vec();
    body.extend(tlv(0x86, uri.as_bytes()));
    tlv(0x30, &body)
}

/// DER AuthorityInfoAccessSyntax extension
pub fn aia_extension(ca_issuers: &[&str], ocsp: Option<&str>) -> CustomExtension {
    let mut descriptions = Vec::new();
    if let Some(uri) = ocsp {
        descriptions.extend(access_description(OID_AD_OCSP, uri));
    }
    for uri in ca_issuers {
        descriptions.extend(access_description(OID_AD_CA_ISSUERS, uri));
    }
    CustomExtension::from_oid_content(OID_AUTHORITY_INFO_ACCESS, tlv(0x30, &descriptions))
}

fn params(common_name: &str, profile: &Profile) -> CertificateParams {
    let mut params = CertificateParams::new(vec![]).unwrap();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, common_name);
    params.distinguished_name.push(DnType::OrganizationName, "Test Org");
    params.is_ca = if profile.ca {
        IsCa::Ca(BasicConstraints::Unconstrained)
    } else {
        IsCa::NoCa
    };
    if !profile.ca_issuers.is_empty() || profile.ocsp.is_some() {
        params
            .custom_extensions
            .push(aia_extension(&profile.ca_issuers, profile.ocsp));
    }
    params
}

/// Self-signed root CA without an AKI extension
pub fn root_ca(common_name: &str) -> TestCa {
    let key = KeyPair::generate().unwrap();
    let profile = Profile {
        ca: true,
        ..Default::default()
    };
    let cert = params(common_name, &profile).self_signed(&key).unwrap();
    TestCa { cert, key }
}

/// Certificate signed by `issuer`, carrying an AKI that points at it
pub fn issued_by(common_name: &str, issuer: &TestCa, profile: Profile) -> TestCa {
    let key = KeyPair::generate().unwrap();
    let mut params = params(common_name, &profile);
    params.use_authority_key_identifier_extension = true;
    let cert = params.signed_by(&key, &issuer.cert, &issuer.key).unwrap();
    TestCa { cert, key }
}

/// curl.se style bundle section for each root
pub fn bundle_text(roots: &[(&str, &TestCa)]) -> String {
    let mut text = String::from("##\n## Bundle of CA Root Certificates\n##\n\n");
    for (label, root) in roots {
        text.push_str(label);
        text.push('\n');
        text.push_str(&"=".repeat(label.len().max(5)));
        text.push('\n');
        text.push_str(&root.pem());
        text.push('\n');
    }
    text
}

/// Serves fixed bodies by URI and records every request; unknown URIs are 404
#[derive(Default)]
pub struct MapFetcher {
    responses: HashMap<String, HttpResponse>,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, uri: &str, body: Vec<u8>) -> Self {
        self.responses.insert(uri.to_string(), HttpResponse::ok(body));
        self
    }

    pub fn serve_response(mut self, uri: &str, response: HttpResponse) -> Self {
        self.responses.insert(uri.to_string(), response);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl IssuerFetcher for MapFetcher {
    async fn get(&self, uri: &str) -> Result<HttpResponse, String> {
        self.requested.lock().unwrap().push(uri.to_string());
        Ok(self
            .responses
            .get(uri)
            .cloned()
            .unwrap_or_else(HttpResponse::not_found))
    }
}
