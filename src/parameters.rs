use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use serde_json::Value;
use thiserror::Error;

use crate::jwt::claims::{Claims, ReservedClaimError};
use crate::jwt::encoding::SegmentEncoding;
use crate::jwt::signer::JwtSignerImpl;
use crate::jwt::signer::hmac_sha256::HmacSha256Signer;
use crate::key::{SecretKey, SecretKeyError};

#[derive(Error, Debug)]
pub enum ParametersError {
    #[error("invalid claim `{0}`, expected `name=value`")]
    InvalidClaim(String),
    #[error("{0}")]
    ReservedClaim(#[from] ReservedClaimError),
    #[error("loading secret key: `{0}`")]
    SecretKey(#[from] SecretKeyError),
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Builds an HS256 signed JWT from the given claims and secret.
    Sign(SignArgs),
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Claims carried by the token payload.
    #[command(flatten)]
    pub claims: ClaimArgs,

    /// Where the HMAC secret comes from, exactly one of them must be given.
    #[command(flatten)]
    pub secret: SecretInputArgs,

    /// Base64 alphabet for the header and payload segments
    #[arg(long, value_enum, default_value_t = SegmentEncodingChoice::Standard)]
    pub segment_encoding: SegmentEncodingChoice,

    /// Select how the token should be printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output_format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ClaimArgs {
    /// Subject: identifier of the user the token refers to
    #[arg(long)]
    pub sub: String,

    /// Issued at, in seconds since the Unix epoch. Defaults to now.
    #[arg(long, conflicts_with = "issued_on")]
    pub iat: Option<i64>,

    /// Issued at, as midnight UTC of the given date (YYYY-MM-DD)
    #[arg(long)]
    pub issued_on: Option<NaiveDate>,

    /// Issuer
    #[arg(long)]
    pub iss: Option<String>,

    /// Audience
    #[arg(long)]
    pub aud: Option<String>,

    /// Expiration time, in seconds since the Unix epoch
    #[arg(long)]
    pub exp: Option<i64>,

    /// Not before, in seconds since the Unix epoch
    #[arg(long)]
    pub nbf: Option<i64>,

    /// JWT ID
    #[arg(long, conflicts_with = "generate_jti")]
    pub jti: Option<String>,

    /// Use a freshly generated UUIDv7 as JWT ID
    #[arg(long)]
    pub generate_jti: bool,

    /// Private claim as `name=value`. The value is read as JSON, or as a plain string otherwise.
    #[arg(long = "claim", value_name = "NAME=VALUE")]
    pub private_claims: Vec<String>,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SecretInputArgs {
    /// Secret given inline
    #[arg(long)]
    pub secret: Option<String>,

    /// Name of the environment variable holding the secret (`.env` is honored)
    #[arg(long)]
    pub secret_env: Option<String>,

    /// Path to a file holding the secret
    #[arg(long)]
    pub secret_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum SegmentEncodingChoice {
    /// Padded standard base64
    #[value(name = "standard")]
    Standard,
    /// Unpadded URL-safe base64, as RFC 7519 mandates
    #[value(name = "url-safe")]
    UrlSafe,
}

impl From<SegmentEncodingChoice> for SegmentEncoding {
    fn from(choice: SegmentEncodingChoice) -> Self {
        match choice {
            SegmentEncodingChoice::Standard => SegmentEncoding::Standard,
            SegmentEncodingChoice::UrlSafe => SegmentEncoding::UrlSafeNoPad,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    /// Returns only the compact token
    #[value(name = "Plain")]
    Plain,
    /// Returns header, payload, signature and token in json format
    #[value(name = "Json")]
    Json,
    /// Returns every intermediate value with a label
    #[value(name = "Verbose")]
    Verbose,
}

pub fn build_claims(args: &ClaimArgs, now: DateTime<Utc>) -> Result<Claims, ParametersError> {
    let iat = match (args.iat, args.issued_on) {
        (Some(iat), _) => iat,
        (None, Some(date)) => date.and_time(NaiveTime::MIN).and_utc().timestamp(),
        (None, None) => now.timestamp(),
    };

    let mut claims = Claims::new(args.sub.as_str(), iat);
    if let Some(iss) = &args.iss {
        claims = claims.with_issuer(iss);
    }
    if let Some(aud) = &args.aud {
        claims = claims.with_audience(aud);
    }
    if let Some(exp) = args.exp {
        claims = claims.with_expiration(exp);
    }
    if let Some(nbf) = args.nbf {
        claims = claims.with_not_before(nbf);
    }
    if let Some(jti) = &args.jti {
        claims = claims.with_jwt_id(jti);
    } else if args.generate_jti {
        claims = claims.with_generated_jwt_id();
    }
    for raw in &args.private_claims {
        let (name, value) = parse_private_claim(raw)?;
        claims = claims.with_private_claim(name, value)?;
    }

    Ok(claims)
}

pub fn parse_private_claim(raw: &str) -> Result<(String, Value), ParametersError> {
    let (name, value) = raw
        .split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ParametersError::InvalidClaim(raw.to_string()))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

pub fn select_secret_key(args: &SecretInputArgs) -> Result<SecretKey, ParametersError> {
    let key = match (&args.secret, &args.secret_env, &args.secret_file) {
        (Some(secret), _, _) => SecretKey::try_from(secret.as_str())?,
        (None, Some(var), _) => SecretKey::from_env(var)?,
        (None, None, Some(path)) => SecretKey::try_from(path.as_path())?,
        (None, None, None) => return Err(SecretKeyError::Empty.into()),
    };
    Ok(key)
}

pub fn build_signer(args: &SignArgs) -> Result<JwtSignerImpl, ParametersError> {
    let key = select_secret_key(&args.secret)?;
    Ok(JwtSignerImpl::Hmac(HmacSha256Signer::new(
        key,
        args.segment_encoding.into(),
    )))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jwt::signer::JwtSigner;
    use crate::jwt::test::{HEADER_SEGMENT, IAT, PAYLOAD_SEGMENT, SIGNATURE_SEGMENT};
    use assert_matches::assert_matches;
    use clap::Parser;
    use rstest::rstest;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Result<SignArgs, clap::Error> {
        let cli = TestCli::try_parse_from(["hs-jwt-cli", "sign"].iter().chain(args).copied())?;
        match cli.command {
            Commands::Sign(sign_args) => Ok(sign_args),
        }
    }

    #[test]
    fn demo_arguments_reproduce_demo_token() {
        let args = parse(&[
            "--sub",
            "user_id",
            "--issued-on",
            "2023-01-01",
            "--secret",
            "secretKey",
        ])
        .unwrap();

        let claims = build_claims(&args.claims, Utc::now()).unwrap();
        assert_eq!(claims.iat(), IAT);

        let signed = build_signer(&args).unwrap().sign(&claims).unwrap();
        assert_eq!(
            signed.value(),
            format!("{HEADER_SEGMENT}.{PAYLOAD_SEGMENT}.{SIGNATURE_SEGMENT}")
        );
        assert_eq!(args.output_format, OutputFormat::Plain);
    }

    #[test]
    fn iat_defaults_to_now() {
        let args = parse(&["--sub", "user_id", "--secret", "secretKey"]).unwrap();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let claims = build_claims(&args.claims, now).unwrap();

        assert_eq!(claims.iat(), 1_700_000_000);
    }

    #[rstest]
    #[case::no_secret(&["--sub", "user_id"])]
    #[case::two_secrets(&["--sub", "user_id", "--secret", "a", "--secret-env", "B"])]
    #[case::iat_and_date(&["--sub", "u", "--secret", "a", "--iat", "1", "--issued-on", "2023-01-01"])]
    #[case::bad_date(&["--sub", "u", "--secret", "a", "--issued-on", "2023-13-01"])]
    #[case::jti_twice(&["--sub", "u", "--secret", "a", "--jti", "x", "--generate-jti"])]
    fn invalid_arguments_are_rejected(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn private_and_registered_claims() {
        let args = parse(&[
            "--sub",
            "user_id",
            "--iat",
            "10",
            "--iss",
            "issuer",
            "--exp",
            "20",
            "--claim",
            "admin=true",
            "--claim",
            "team=core",
            "--secret",
            "secretKey",
        ])
        .unwrap();

        let claims = build_claims(&args.claims, Utc::now()).unwrap();

        assert_eq!(
            serde_json::to_string(&claims).unwrap(),
            r#"{"sub":"user_id","iat":10,"iss":"issuer","exp":20,"admin":true,"team":"core"}"#
        );
    }

    #[test]
    fn private_claims_keep_command_line_order() {
        let args = parse(&[
            "--sub",
            "u",
            "--iat",
            "1",
            "--claim",
            "z=1",
            "--claim",
            "a=2",
            "--secret",
            "a",
        ])
        .unwrap();

        let claims = build_claims(&args.claims, Utc::now()).unwrap();

        assert_eq!(
            serde_json::to_string(&claims).unwrap(),
            r#"{"sub":"u","iat":1,"z":1,"a":2}"#
        );
    }

    #[test]
    fn generated_jti() {
        let args = parse(&["--sub", "u", "--generate-jti", "--secret", "a"]).unwrap();
        let claims = build_claims(&args.claims, Utc::now()).unwrap();
        assert!(claims.jti().is_some());
    }

    #[rstest]
    #[case::json_number("n=42", "n", json!(42))]
    #[case::json_array("scopes=[\"a\"]", "scopes", json!(["a"]))]
    #[case::plain_string("role=admin", "role", json!("admin"))]
    #[case::empty_value("role=", "role", json!(""))]
    #[case::equals_in_value("q=a=b", "q", json!("a=b"))]
    fn private_claim_parsing(#[case] raw: &str, #[case] name: &str, #[case] value: Value) {
        assert_eq!(parse_private_claim(raw).unwrap(), (name.to_string(), value));
    }

    #[rstest]
    #[case("role")]
    #[case("=admin")]
    fn malformed_private_claim(#[case] raw: &str) {
        assert_matches!(parse_private_claim(raw), Err(ParametersError::InvalidClaim(c)) => {
            assert_eq!(c, raw);
        });
    }

    #[test]
    fn reserved_private_claim() {
        let args = parse(&["--sub", "u", "--claim", "sub=other", "--secret", "a"]).unwrap();
        assert_matches!(
            build_claims(&args.claims, Utc::now()),
            Err(ParametersError::ReservedClaim(_))
        );
    }

    #[test]
    fn secret_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "secretKey").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&["--sub", "u", "--secret-file", path.as_str()]).unwrap();

        let key = select_secret_key(&args.secret).unwrap();
        assert_eq!(key.as_bytes(), b"secretKey");
    }

    #[test]
    fn empty_inline_secret() {
        let args = parse(&["--sub", "u", "--secret", ""]).unwrap();
        assert_matches!(
            select_secret_key(&args.secret),
            Err(ParametersError::SecretKey(SecretKeyError::Empty))
        );
    }

    #[test]
    fn url_safe_choice() {
        let args = parse(&[
            "--sub",
            "u",
            "--secret",
            "a",
            "--segment-encoding",
            "url-safe",
        ])
        .unwrap();
        assert_eq!(
            SegmentEncoding::from(args.segment_encoding),
            SegmentEncoding::UrlSafeNoPad
        );
    }
}
