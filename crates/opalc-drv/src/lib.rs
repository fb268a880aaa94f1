//! opalc-drv - Compiler driver.
//!
//! The driver owns everything outside the parse: reading the source file,
//! the scan-only token dump, and writing the three output files. It is
//! deliberately thin — the pipeline is
//!
//! ```text
//! source bytes ──▶ opalc-par::compile ──▶ { decl, type, impl } ──▶ files
//! ```
//!
//! Output files are written only after a successful parse, so a
//! diagnostic never leaves partial output behind; the non-zero exit is
//! the contract for any incomplete compilation.

use std::fs;
use std::path::PathBuf;

use opalc_lex::{Lexer, Token};
use opalc_util::CompileResult;
use tracing::debug;

/// Driver configuration, assembled from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file to compile.
    pub source: PathBuf,
    /// Base name for the output files; defaults to the source path.
    pub out_base: Option<String>,
    /// Scan only: print the token stream and stop after EOF.
    pub scan_only: bool,
}

impl Config {
    /// Effective output base name.
    pub fn base(&self) -> String {
        match &self.out_base {
            Some(base) => base.clone(),
            None => self.source.display().to_string(),
        }
    }
}

/// Runs one compilation (or scan) according to `config`.
pub fn run(config: &Config) -> CompileResult<()> {
    let source = fs::read(&config.source)?;
    debug!(
        file = %config.source.display(),
        bytes = source.len(),
        "read source"
    );

    if config.scan_only {
        print!("{}", scan(&source)?);
        return Ok(());
    }

    let base = config.base();
    let output = opalc_par::compile(&source, &base)?;

    fs::write(format!("{}.decl.h", base), &output.decl)?;
    fs::write(format!("{}.type.h", base), &output.types)?;
    fs::write(format!("{}.impl.c", base), &output.imp)?;
    debug!(base = %base, "wrote output files");
    Ok(())
}

/// Renders the token stream for scan mode.
///
/// Numbers print as `#N`, identifiers as `@name`, strings quoted,
/// end-of-line as a real newline, everything else by its spelling.
pub fn scan(source: &[u8]) -> CompileResult<String> {
    let mut lexer = Lexer::new(source);
    lexer.set_visible_eol(true);

    let mut out = String::new();
    loop {
        match lexer.next()? {
            Token::EOF => break,
            Token::EOL => out.push('\n'),
            Token::NUM => out.push_str(&format!("#{} ", lexer.num)),
            Token::IDENT => out.push_str(&format!("@{} ", lexer.ident)),
            Token::STR => {
                out.push_str(&format!("\"{}\" ", String::from_utf8_lossy(&lexer.text)))
            }
            tok => out.push_str(&format!("{} ", tok.spelling())),
        }
    }
    Ok(out)
}
