//! The interactive console session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::cache::CachedRoutes;
use crate::config::AppConfig;
use crate::domain::{PointId, PointRecord, RouteDate};
use crate::points::{PointDirectory, PointLevel, PointStore};
use crate::rasp::{RaspApi, RouteQuery};
use crate::resolve::{PointResolver, Resolution};

use super::command::{
    ChangeSetting, Command, FindTarget, HELP_TEXT, ListTarget, ScanTarget,
};
use super::output;

pub const PROMPT: &str = "[waybuilder]>  ";

const INVALID_INPUT: &str = "invalid input, check [help]";
const RESCAN_HINT: &str = "try to rescan points";

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A console session reading commands from `R` and writing to `W`.
pub struct Session<A, R, W> {
    routes: CachedRoutes<A>,
    directory: PointDirectory,
    store: PointStore,
    resolver: PointResolver,
    config: AppConfig,
    config_path: PathBuf,
    log_path: Option<PathBuf>,
    today: Option<NaiveDate>,
    input: R,
    out: W,
}

impl<A: RaspApi, R: BufRead, W: Write> Session<A, R, W> {
    pub fn new(api: A, config: AppConfig, config_path: impl Into<PathBuf>, input: R, out: W) -> Self {
        Self {
            routes: CachedRoutes::new(api, &config.cache_config()),
            directory: PointDirectory::default(),
            store: PointStore::new(&config.point_list_path),
            resolver: PointResolver::new(config.resolver_config()),
            config,
            config_path: config_path.into(),
            log_path: None,
            today: None,
            input,
            out,
        }
    }

    /// Start with an already loaded point list.
    pub fn with_points(mut self, directory: PointDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Pin the date used for `today` and `tomorrow`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn directory(&self) -> &PointDirectory {
        &self.directory
    }

    pub fn routes(&self) -> &CachedRoutes<A> {
        &self.routes
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Everything written so far, for sinks that keep it.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Read and run commands until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.out)?;
                break;
            };
            if line.is_empty() {
                continue;
            }

            let flow = match Command::parse_line(&line) {
                Ok(command) => self.execute(command).await?,
                Err(e) => {
                    debug!(%line, error = %e, "rejected input");
                    writeln!(self.out, "{INVALID_INPUT}")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        info!("session finished");
        Ok(())
    }

    /// Run a single parsed command.
    pub async fn execute(&mut self, command: Command) -> io::Result<Flow> {
        debug!(?command, "executing");

        match command {
            Command::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Command::Quit => return Ok(Flow::Exit),
            Command::Save => self.save()?,
            Command::Logdir => self.logdir()?,
            Command::Change {
                setting: ChangeSetting::Lang { lang },
            } => self.change_lang(lang)?,
            Command::Scan {
                target: ScanTarget::Points,
            } => self.scan_points().await?,
            Command::List { target } => self.list(target).await?,
            Command::Find {
                target: FindTarget::Way,
            } => self.find_way().await?,
            Command::Find { target } => {
                if let Some((level, text)) = target.point_search() {
                    self.find_points(level, &text)?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn save(&mut self) -> io::Result<()> {
        let config = self.config.save(&self.config_path);
        let points = self.store.save(self.directory.list());

        match (config, points) {
            (Ok(()), Ok(())) => {
                info!(config = %self.config_path.display(), points = %self.store.path().display(), "saved");
                writeln!(self.out, "Save is done")
            }
            (config, points) => {
                if let Err(e) = config {
                    error!(error = %e, "failed to save config");
                }
                if let Err(e) = points {
                    error!(error = %e, "failed to save point list");
                }
                writeln!(self.out, "Cannot save config or points, check path")
            }
        }
    }

    fn logdir(&mut self) -> io::Result<()> {
        let path = self.log_path.as_deref().unwrap_or(&self.config.log_dir);
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        writeln!(self.out, "{}", absolute.display())
    }

    fn change_lang(&mut self, lang: String) -> io::Result<()> {
        self.routes.api_mut().set_lang(&lang);
        // Cached routes carry names in the old language.
        self.routes.invalidate_all();
        info!(%lang, "language changed");
        writeln!(self.out, "Language is {lang}")?;
        self.config.api_lang = lang;
        Ok(())
    }

    async fn scan_points(&mut self) -> io::Result<()> {
        match self.routes.api().stations_list().await {
            Ok(list) => {
                self.directory = PointDirectory::from_list(list);
                info!(
                    countries = self.directory.list().countries.len(),
                    settlements = self.directory.settlement_records().len(),
                    stations = self.directory.station_records().len(),
                    "point list scanned"
                );
                writeln!(self.out, "Scan is done")
            }
            Err(e) => {
                error!(error = %e, "point scan failed");
                writeln!(self.out, "Cannot scan points, check api config or log journal")
            }
        }
    }

    async fn list(&mut self, target: ListTarget) -> io::Result<()> {
        let (level, records) = match target {
            ListTarget::Country => (PointLevel::Country, Some(self.directory.countries())),
            ListTarget::Region { country } => (PointLevel::Region, self.directory.regions(&country)),
            ListTarget::City { country, region } => (
                PointLevel::City,
                self.directory.settlements(&country, &region),
            ),
            ListTarget::Station {
                country,
                region,
                city,
            } => (
                PointLevel::Station,
                self.directory.stations(&country, &region, &city),
            ),
            ListTarget::Way { from, to, date } => {
                return self.list_way_args(&from, &to, date.as_deref()).await;
            }
        };

        self.write_point_table(level, records.unwrap_or_default(), "Get list error")
    }

    fn find_points(&mut self, level: PointLevel, text: &str) -> io::Result<()> {
        let records = self.directory.find(level, text);
        self.write_point_table(
            level,
            records,
            &format!("Can not find {level} by {{{text}}} request"),
        )
    }

    fn write_point_table(
        &mut self,
        level: PointLevel,
        records: Vec<PointRecord>,
        failure: &str,
    ) -> io::Result<()> {
        if records.iter().any(|r| r.candidate().is_some()) {
            output::write_points(&mut self.out, level, &records)?;
            return Ok(());
        }

        warn!(%level, "no points to list");
        writeln!(self.out, "{failure}")?;
        writeln!(self.out, "{RESCAN_HINT}")
    }

    async fn list_way_args(&mut self, from: &str, to: &str, date: Option<&str>) -> io::Result<()> {
        let (Ok(from), Ok(to)) = (PointId::parse(from), PointId::parse(to)) else {
            return writeln!(self.out, "{INVALID_INPUT}");
        };

        let date = match RouteDate::parse(date.unwrap_or("today"), self.today()) {
            Ok(date) => date,
            Err(e) => {
                debug!(error = %e, "bad route date");
                return writeln!(self.out, "{INVALID_INPUT}");
            }
        };

        self.list_way(RouteQuery::new(from, to, date)).await
    }

    async fn list_way(&mut self, query: RouteQuery) -> io::Result<()> {
        let search = match self.routes.search(&query).await {
            Ok(search) => search,
            Err(e) => {
                error!(from = %query.from, to = %query.to, date = %query.date, error = %e, "route search failed");
                return writeln!(self.out, "Ways scan error, check log journal");
            }
        };

        if !output::write_routes(&mut self.out, &query, &search)? {
            writeln!(
                self.out,
                "Can not find ways by {{ from point: {} / to point: {} / date: {} }} request",
                query.from, query.to, query.date
            )?;
            writeln!(self.out, "{RESCAN_HINT}")?;
        }
        Ok(())
    }

    async fn find_way(&mut self) -> io::Result<()> {
        if self.directory.is_empty() {
            writeln!(self.out, "Point list is empty, run [scan points] first")?;
            return Ok(());
        }

        let Some(from) = self.prompt_point("from")? else {
            return Ok(());
        };
        let Some(to) = self.prompt_point("to")? else {
            return Ok(());
        };
        let Some(date) = self.prompt_date()? else {
            return Ok(());
        };

        self.list_way(RouteQuery::new(from, to, date)).await
    }

    /// Ask for a place name until it resolves to one point.
    ///
    /// Returns `None` on end of input or when there is nothing to match.
    fn prompt_point(&mut self, label: &str) -> io::Result<Option<PointId>> {
        let Self {
            directory,
            resolver,
            input,
            out,
            ..
        } = self;

        loop {
            write!(out, "[input <{label}> point name]> ")?;
            out.flush()?;
            let Some(name) = read_line(input)? else {
                return Ok(None);
            };

            let resolved = resolver.resolve(
                &name,
                directory.settlement_records(),
                directory.station_records(),
            );
            debug!(%name, scored = resolved.scored, skipped = resolved.skipped, "resolved point name");

            let candidate = match resolved.resolution {
                Resolution::Unique(candidate) => candidate,
                Resolution::NoMatch => {
                    writeln!(out, "No match, try rescanning points")?;
                    return Ok(None);
                }
                Resolution::Ambiguous(suggestions) => {
                    writeln!(out, "list of similar names:")?;
                    for (i, suggestion) in suggestions.iter().enumerate() {
                        writeln!(out, "({i}) {}", suggestion.candidate.name)?;
                    }
                    writeln!(out)?;
                    write!(out, "[Choose number of request]> ")?;
                    out.flush()?;

                    let Some(choice) = read_line(input)? else {
                        return Ok(None);
                    };
                    match choice.parse::<usize>().ok().and_then(|i| suggestions.choose(i)) {
                        Some(candidate) => candidate,
                        None => {
                            writeln!(out, "No such option, repeat request")?;
                            continue;
                        }
                    }
                }
            };

            match PointId::parse(candidate.id) {
                Ok(id) => {
                    info!(%label, name = candidate.name, %id, "point chosen");
                    writeln!(out, "{label}: {} [{id}]", candidate.name)?;
                    return Ok(Some(id));
                }
                Err(e) => {
                    warn!(id = candidate.id, error = %e, "point has a malformed id");
                    writeln!(out, "This point is corrupt, choose another point")?;
                }
            }
        }
    }

    /// Ask for a date; an empty answer means today.
    fn prompt_date(&mut self) -> io::Result<Option<RouteDate>> {
        let today = self.today();
        loop {
            write!(self.out, "[input flight date]> ")?;
            self.out.flush()?;
            let Some(line) = read_line(&mut self.input)? else {
                return Ok(None);
            };
            let text = if line.is_empty() { "today" } else { line.as_str() };

            match RouteDate::parse(text, today) {
                Ok(date) => return Ok(Some(date)),
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }
}

/// Read one line, trimmed. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
