mod common;

use common::{issued_by, root_ca, Profile};
use ssl_chain::models::CertificateSource;
use ssl_chain::report::{chain_file_name, write_chain, PemExporter};
use ssl_chain::CertificateChain;

fn two_level_chain() -> CertificateChain {
    let root = root_ca("Persist Root");
    let leaf = issued_by("persist.test", &root, Profile::default());
    let mut chain = CertificateChain::new(leaf.parsed());
    chain.push(root.parsed(), CertificateSource::RootStore);
    chain
}

fn count_blocks(text: &str) -> usize {
    text.matches("-----BEGIN CERTIFICATE-----").count()
}

#[test]
fn test_export_certificate() {
    let chain = two_level_chain();

    let pem = PemExporter::export_certificate(chain.last());

    assert_eq!(count_blocks(&pem), 1);
    assert!(pem.ends_with("-----END CERTIFICATE-----\n"));
    assert!(pem.lines().all(|line| line.len() <= 64));
    let parsed = ::pem::parse(&pem).unwrap();
    assert_eq!(parsed.contents(), chain.last().der());
}

#[test]
fn test_write_chain_creates_directory_and_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested").join("certs");
    let chain = two_level_chain();

    let files = write_chain(&chain, &output, false).unwrap();

    assert_eq!(files, vec![output.join(chain_file_name(&chain))]);
    assert!(chain_file_name(&chain).contains("Persist_Root"));
    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert_eq!(count_blocks(&text), 2);
}

#[test]
fn test_write_chain_purges_stale_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stale-one.crt"), "old").unwrap();
    std::fs::write(dir.path().join("stale-two.crt"), "old").unwrap();
    let chain = two_level_chain();

    let files = write_chain(&chain, dir.path(), true).unwrap();

    assert_eq!(files.len(), 1);
    assert!(!dir.path().join("stale-one.crt").exists());
    assert!(!dir.path().join("stale-two.crt").exists());
    assert_eq!(files[0], dir.path().join(chain_file_name(&chain)));
}

#[test]
fn test_write_chain_without_purge_lists_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("previous.crt"), "old").unwrap();
    let chain = two_level_chain();

    let files = write_chain(&chain, dir.path(), false).unwrap();

    assert_eq!(files.len(), 2);
    assert!(files.contains(&dir.path().join("previous.crt")));
}

#[test]
fn test_rerun_does_not_duplicate_certificates() {
    let dir = tempfile::tempdir().unwrap();
    let chain = two_level_chain();

    write_chain(&chain, dir.path(), false).unwrap();
    let files = write_chain(&chain, dir.path(), false).unwrap();

    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert_eq!(count_blocks(&text), 2);
}
