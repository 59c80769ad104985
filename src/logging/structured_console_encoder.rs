//! Console encoder that appends a record's key/value pairs after the
//! formatted message, e.g. `... - Factom API: sending request action=heights method=POST`.

use std::io;

use log::{
    Record,
    kv::{self, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

const DEFAULT_PATTERN: &str = "{d} {l} {t} - {m}";

/// Keys whose values never reach the console.
const SENSITIVE_KEYS: [&str; 3] = ["password", "secret", "authorization"];

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
}

#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    message: PatternEncoder,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            message: PatternEncoder::new(pattern),
        }
    }
}

impl Default for StructuredConsoleEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.message.encode(w, record)?;

        let mut pairs = PairWriter { out: w, failure: None };
        if let Err(kv_err) = record.key_values().visit(&mut pairs) {
            match pairs.failure.take() {
                Some(io_err) => return Err(io_err.into()),
                None => write!(w, " [kv error: {}]", kv_err)?,
            }
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

struct PairWriter<'a> {
    out: &'a mut dyn Write,
    failure: Option<io::Error>,
}

impl PairWriter<'_> {
    fn write_pair(&mut self, key: &Key<'_>, value: &Value<'_>) -> io::Result<()> {
        self.out.set_style(Style::new().text(Color::Cyan))?;
        write!(self.out, " {}=", key)?;
        self.out.set_style(&Style::default())?;

        if SENSITIVE_KEYS.iter().any(|k| key.as_str().eq_ignore_ascii_case(k)) {
            write!(self.out, "<REDACTED>")
        } else {
            write!(self.out, "{}", value)
        }
    }
}

impl<'kvs> VisitSource<'kvs> for PairWriter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        if let Err(e) = self.write_pair(&key, &value) {
            self.failure = Some(e);
            return Err(kv::Error::msg("io error while writing key/value pairs"));
        }
        Ok(())
    }
}

pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let encoder = match config.pattern.as_deref() {
            Some(pattern) => StructuredConsoleEncoder::new(pattern),
            None => StructuredConsoleEncoder::default(),
        };
        Ok(Box::new(encoder))
    }
}
