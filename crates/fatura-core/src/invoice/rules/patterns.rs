//! Common regex patterns for Brazilian billing documents.
//!
//! Amounts use the source locale: `.` groups thousands and `,` separates
//! the two decimal digits (`1.234,56`).

use lazy_static::lazy_static;
use regex::Regex;

/// A decimal value in source-locale form, unanchored.
macro_rules! value {
    () => {
        r"([0-9]+(?:\.[0-9]+)*,[0-9]{2})"
    };
}

/// Terms that flag a page as a payment slip (boleto), matched upper-cased.
pub const SLIP_TERMS: &[&str] = &[
    "BOLETO",
    "CÓDIGO DE BARRAS",
    "FICHA DE COMPENSAÇÃO",
    "PAGAMENTO",
    "VENCIMENTO",
    "CEDENTE",
];

/// Anchor phrase opening every sub-invoice of a composite carrier bill.
pub const COMPOSITE_BLOCK_HEADER: &str = "NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES";

lazy_static! {
    // Whole-string value shapes
    pub static ref BARE_VALUE: Regex = Regex::new(concat!("^", value!(), "$")).unwrap();

    pub static ref CURRENCY_VALUE: Regex = Regex::new(concat!(r"(?i)R\$\s*", value!())).unwrap();

    // Keyword-anchored totals, in trust order. Each pattern may span lines.
    pub static ref KEYWORD_PATTERNS: Vec<Regex> = [
        concat!(r"(?is)VALOR.*?R\$\s*", value!()),
        concat!(r"(?is)TOTAL\s*R\$\s*", value!()),
        concat!(r"(?is)TOTAL.*?R\$\s*", value!()),
        concat!(r"(?is)TOTAL FATURA.*?R\$\s*", value!()),
        concat!(r"(?is)LÍQUIDO FATURA.*?", value!()),
        concat!(r"(?is)TOTAL\s+LÍQUIDO\s+FATURA\s*R\$\s*", value!()),
        concat!(r"(?is)TOTAL\s+FATURA\s*R\$\s*", value!()),
        concat!(r"(?is)TOTAL\s+FATURA.*?R\$\s*", value!()),
        concat!(r"(?is)VALOR TOTAL\s*R\$\s*", value!()),
        concat!(r"(?is)TOTAL SERVIÇOS DE TELECOMUNICAÇÕES\s*R\$\s*", value!()),
        concat!(r"(?is)TOTAL VOGEL SOL\. EM TEL\. E INF\. S\.A\.\s*", value!()),
        concat!(r"(?is)VALOR\s*DO\s*DOCUMENTO\s*R?\$?\s*", value!()),
        concat!(r"(?is)VALOR\s*COBRADO\s*R?\$?\s*", value!()),
        concat!(r"(?is)VALOR\s*A\s*PAGAR\s*R?\$?\s*", value!()),
        concat!(r"(?is)PAGAMENTO\s*R?\$?\s*", value!()),
        concat!(r"(?is)VALOR\s*L[ÍI]QUIDO\s*R?\$?\s*", value!()),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    // Slip vocabulary, scoped to a single page
    pub static ref SLIP_PATTERNS: Vec<Regex> = [
        concat!(r"(?i)(?:VALOR|DOCUMENTO)[\s:]*R?\$?\s*", value!()),
        concat!(r"(?i)(?:COBRADO|PAGÁVEL)[\s:]*R?\$?\s*", value!()),
        concat!(r"(?i)(?:PAGAMENTO|TOTAL)[\s:]*R?\$?\s*", value!()),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    // Digit run with embedded spaces; a typeable slip line has 47 (bank)
    // or 48 (utility/tax) digits once the spaces are gone
    pub static ref DIGIT_LINE: Regex = Regex::new(r"[0-9]+(?: +[0-9]+)*").unwrap();

    // Composite carrier bill
    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"N[ºo°]\s*da\s+Conta:\s*(\d+)"
    ).unwrap();

    pub static ref REFERENCE_PERIOD: Regex = Regex::new(
        r"Mês de referência:\s*(\d{2}/\d{4})"
    ).unwrap();

    pub static ref AMOUNT_DUE: Regex = Regex::new(
        concat!(r"Total a Pagar - R\$\s*", value!())
    ).unwrap();

    pub static ref BLOCK_TAX_ID: Regex = Regex::new(
        r"CNPJ:\s*([0-9.\-]+/[0-9\-]+)"
    ).unwrap();

    pub static ref BLOCK_TOTAL: Regex = Regex::new(
        concat!(r"TOTAL NOTA FISCAL TELEFONICA BRASIL S\.A\.\s*", value!())
    ).unwrap();
}
