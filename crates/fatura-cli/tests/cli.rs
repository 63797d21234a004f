use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fatura(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fatura").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn extract_prints_keyword_candidates() {
    let dir = TempDir::new().unwrap();
    write(&dir, "nota.txt", "Nota fiscal\nVALOR TOTAL R$ 1.120,00\n");

    fatura(dir.path())
        .args(["extract", "nota.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keyword"))
        .stdout(predicate::str::contains("R$ 1.120,00"));
}

#[test]
fn extract_json_reports_generic_scan() {
    let dir = TempDir::new().unwrap();
    write(&dir, "recibo.txt", "Recibo 5,00 1.234,56 9,99");

    fatura(dir.path())
        .args(["extract", "recibo.txt", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""strategy": "monetary""#))
        .stdout(predicate::str::contains("1.234,56"))
        .stdout(predicate::str::contains("9,99").not());
}

#[test]
fn extract_fails_without_candidates() {
    let dir = TempDir::new().unwrap();
    write(&dir, "vazio.txt", "nada");

    fatura(dir.path())
        .args(["extract", "vazio.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no total value found in vazio.txt"));
}

#[test]
fn add_numbers_items_across_runs() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.txt", "TOTAL R$ 50,00");
    write(&dir, "b.txt", "TOTAL R$ 1.070,00");

    for file in ["a.txt", "b.txt"] {
        fatura(dir.path())
            .args(["add", file, "--supplier", "100200", "--description", "Energia"])
            .args(["--first", "--batch", "batch.json"])
            .assert()
            .success();
    }

    fatura(dir.path())
        .args(["batch", "show", "--format", "csv", "--batch", "batch.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PREQ_ITEM,MATERIAL,SHORT_TEXT,QUANTITY,PREQ_PRICE"))
        .stdout(predicate::str::contains("0010,ZA040282,\"[M,100200] Energia\",1,50.00"))
        .stdout(predicate::str::contains("0020,ZA040282,\"[M,100200] Energia\",1,1070.00"));
}

#[test]
fn add_composite_bill() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "VIVO_MOVEL_0325.txt",
        "Nº da Conta: 0123456789\n\
         NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES CNPJ: 02.558.157/0001-62\n\
         TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 1.000,00\n\
         NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES CNPJ: 11.222.333/0001-81\n\
         TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 35,90\n",
    );

    fatura(dir.path())
        .args(["add", "VIVO_MOVEL_0325.txt", "--service", "--first", "--batch", "batch.json"])
        .assert()
        .success();

    let saved = fs::read_to_string(dir.path().join("batch.json")).unwrap();
    assert!(saved.contains("[S,400100] Fatura Vivo Movel"));
    assert!(saved.contains("[S,11222333000181] Fatura Vivo Movel"));
    assert!(saved.contains("\"0020\""));
}

#[test]
fn add_keeps_going_after_a_bad_document() {
    let dir = TempDir::new().unwrap();
    write(&dir, "1.txt", "TOTAL R$ 10,00");
    write(&dir, "2.txt", "sem valor");

    fatura(dir.path())
        .args(["add", "*.txt", "--supplier", "1", "--first", "--batch", "batch.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("2.txt"));

    let saved = fs::read_to_string(dir.path().join("batch.json")).unwrap();
    assert!(saved.contains("10.00"));
}

#[test]
fn request_reports_missing_fields() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.txt", "TOTAL R$ 50,00");
    fatura(dir.path())
        .args(["add", "a.txt", "--supplier", "1", "--first", "--batch", "batch.json"])
        .assert()
        .success();

    fatura(dir.path())
        .args(["request", "--batch", "batch.json", "--text-line", "Energia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Delivery date, Cost center, GL account"));
}

#[test]
fn request_writes_envelope_and_clears() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.txt", "TOTAL R$ 50,00");
    fatura(dir.path())
        .args(["add", "a.txt", "--supplier", "1", "--first", "--batch", "batch.json"])
        .assert()
        .success();

    fatura(dir.path())
        .args(["request", "--batch", "batch.json", "--output", "request.json", "--clear"])
        .args(["--text-line", "Energia", "--delivery-date", "05/03/2025"])
        .args(["--cost-center", "BR22010", "--gl-account", "6120300 - Telefonia"])
        .args(["--requester", "maria silva"])
        .assert()
        .success();

    let request = fs::read_to_string(dir.path().join("request.json")).unwrap();
    assert!(request.contains("ZSBR_MM_AZU_WEBSHOP_PREQ"));
    assert!(request.contains("05 Março 2025"));
    assert!(request.contains(r#""CONTA_RAZAO": "6120300""#));
    assert!(request.contains(r#""NOME": "Maria Silva""#));

    fatura(dir.path())
        .args(["batch", "show", "--batch", "batch.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch is empty."));
}

#[test]
fn request_rejects_empty_batch() {
    let dir = TempDir::new().unwrap();

    fatura(dir.path())
        .args(["request", "--batch", "batch.json"])
        .args(["--text-line", "x", "--delivery-date", "05/03/2025"])
        .args(["--cost-center", "1", "--gl-account", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch has no items"));
}

#[test]
fn config_init_and_get() {
    let dir = TempDir::new().unwrap();

    fatura(dir.path())
        .args(["config", "init", "--output", "config.json"])
        .assert()
        .success();

    fatura(dir.path())
        .args(["config", "init", "--output", "config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fatura(dir.path())
        .args(["--config", "config.json", "config", "get", "payload.material_code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ZA040282"));
}
