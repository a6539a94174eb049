use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, ensure, Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::config::HarvestConfig;

/// Bounds on how many posts one crawl may request.
pub const MIN_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 500;

/// A validated search over a date window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestRequest {
    keyword: String,
    since: NaiveDate,
    until: NaiveDate,
    limit: u32,
}

impl HarvestRequest {
    pub fn new(keyword: &str, since: NaiveDate, until: NaiveDate, limit: u32) -> Result<Self> {
        let keyword = keyword.trim();
        ensure!(!keyword.is_empty(), "keyword must not be empty");
        ensure!(
            since <= until,
            "since ({since}) must not be later than until ({until})"
        );
        ensure!(
            (MIN_LIMIT..=MAX_LIMIT).contains(&limit),
            "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {limit}"
        );
        Ok(Self {
            keyword: keyword.to_string(),
            since,
            until,
            limit,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// `"{keyword} since:{since} until:{until} lang:{language}"`
    pub fn search_query(&self, language: &str) -> String {
        format!(
            "{} since:{} until:{} lang:{}",
            self.keyword,
            self.since.format("%Y-%m-%d"),
            self.until.format("%Y-%m-%d"),
            language
        )
    }
}

/// `crawled_data_YYYYmmddHHMMSS.csv`
pub fn output_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("crawled_data_{}.csv", now.format("%Y%m%d%H%M%S"))
}

/// Runs the external post harvester and hands back the CSV it wrote.
pub struct Harvester<'a> {
    config: &'a HarvestConfig,
}

impl<'a> Harvester<'a> {
    pub fn new(config: &'a HarvestConfig) -> Self {
        Self { config }
    }

    fn working_dir(&self) -> &Path {
        self.config
            .working_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
    }

    /// Where the harvester leaves `file_name`.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.working_dir()
            .join(&self.config.output_dir)
            .join(file_name)
    }

    /// Argument vector after the program name. Passed to the child as-is,
    /// never through a shell.
    pub fn arguments(&self, request: &HarvestRequest, file_name: &str, token: &str) -> Vec<OsString> {
        [
            "-y",
            &self.config.package,
            "-o",
            file_name,
            "-s",
            &request.search_query(&self.config.language),
            "--tab",
            &self.config.tab,
            "-l",
            &request.limit.to_string(),
            "--token",
            token,
        ]
        .into_iter()
        .map(OsString::from)
        .collect()
    }

    pub fn command(&self, request: &HarvestRequest, file_name: &str, token: &str) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(self.arguments(request, file_name, token))
            .current_dir(self.working_dir())
            .stdin(Stdio::null());
        cmd
    }

    /// Read the auth token from the configured environment variable.
    pub fn token(&self) -> Result<String> {
        match std::env::var(&self.config.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => bail!(
                "{} is not set; add it to the environment or a .env file",
                self.config.token_env
            ),
        }
    }

    /// Run one crawl. Succeeds only when the expected CSV exists afterwards.
    pub fn run(&self, request: &HarvestRequest) -> Result<PathBuf> {
        let token = self.token()?;
        let file_name = output_file_name(&Local::now());
        let output = self.output_path(&file_name);
        tracing::info!(
            "Harvesting up to {} posts for \"{}\" into {}",
            request.limit,
            request.keyword(),
            output.display()
        );

        let status = self
            .command(request, &file_name, &token)
            .status()
            .with_context(|| format!("cannot start harvester `{}`", self.config.program))?;
        if !status.success() {
            tracing::warn!("Harvester exited with {status}");
        }
        ensure!(
            output.is_file(),
            "Failed to crawl data: {} was not written",
            output.display()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> HarvestRequest {
        HarvestRequest::new("bunuh diri", date(2024, 1, 1), date(2024, 1, 31), 100).unwrap()
    }

    #[test]
    fn search_query_format() {
        assert_eq!(
            request().search_query("en"),
            "bunuh diri since:2024-01-01 until:2024-01-31 lang:en"
        );
    }

    #[test]
    fn keyword_is_trimmed() {
        let r = HarvestRequest::new("  sad  ", date(2024, 1, 1), date(2024, 1, 1), 10).unwrap();
        assert_eq!(r.keyword(), "sad");
    }

    #[test]
    fn rejects_empty_keyword() {
        assert!(HarvestRequest::new("   ", date(2024, 1, 1), date(2024, 1, 2), 50).is_err());
    }

    #[test]
    fn rejects_reversed_dates() {
        assert!(HarvestRequest::new("sad", date(2024, 2, 1), date(2024, 1, 1), 50).is_err());
    }

    #[test]
    fn limit_bounds() {
        let (s, u) = (date(2024, 1, 1), date(2024, 1, 2));
        assert!(HarvestRequest::new("sad", s, u, MIN_LIMIT - 1).is_err());
        assert!(HarvestRequest::new("sad", s, u, MIN_LIMIT).is_ok());
        assert!(HarvestRequest::new("sad", s, u, MAX_LIMIT).is_ok());
        assert!(HarvestRequest::new("sad", s, u, MAX_LIMIT + 1).is_err());
    }

    #[test]
    fn file_name_from_timestamp() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(output_file_name(&now), "crawled_data_20240309070501.csv");
    }

    #[test]
    fn argument_vector() {
        let config = HarvestConfig::default();
        let harvester = Harvester::new(&config);
        let args = harvester.arguments(&request(), "out.csv", "secret");
        let expected = [
            "-y",
            "tweet-harvest@2.6.1",
            "-o",
            "out.csv",
            "-s",
            "bunuh diri since:2024-01-01 until:2024-01-31 lang:en",
            "--tab",
            "LATEST",
            "-l",
            "100",
            "--token",
            "secret",
        ];
        assert_eq!(args, expected.map(OsString::from));
    }

    #[test]
    fn command_runs_in_working_dir() {
        let config = HarvestConfig {
            working_dir: Some(PathBuf::from("/srv/lens")),
            ..HarvestConfig::default()
        };
        let harvester = Harvester::new(&config);
        let cmd = harvester.command(&request(), "out.csv", "secret");
        assert_eq!(cmd.get_program(), "npx");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/srv/lens")));
        assert_eq!(
            harvester.output_path("out.csv"),
            PathBuf::from("/srv/lens/tweets-data/out.csv")
        );
    }

    #[test]
    fn missing_token() {
        let config = HarvestConfig {
            token_env: "IDEATION_LENS_TEST_TOKEN_UNSET".to_string(),
            ..HarvestConfig::default()
        };
        let err = Harvester::new(&config).token().unwrap_err();
        assert!(err.to_string().contains("IDEATION_LENS_TEST_TOKEN_UNSET"));
    }

    #[test]
    fn missing_output_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarvestConfig {
            program: "true".to_string(),
            working_dir: Some(dir.path().to_path_buf()),
            token_env: "IDEATION_LENS_TEST_TOKEN_SET".to_string(),
            ..HarvestConfig::default()
        };
        std::env::set_var("IDEATION_LENS_TEST_TOKEN_SET", "abc");
        let err = Harvester::new(&config).run(&request()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to crawl data"));
    }
}
