//! Authenticated session against a WebUntis server.

use crate::cache::{ttl_from_minutes, ResponseCache};
use crate::config::SessionConfig;
use crate::error::{Result, UntisError};
use crate::id::{ElementType, Id};
use crate::parse::{self, compact_date};
use crate::rpc::RpcClient;
use crate::search;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    Holiday, Klasse, LoginInfo, Period, Room, SchoolYear, SearchMatches, Student, Subject,
    Teacher, TimeGrid,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Default number of students returned by [`Session::search_student`].
pub const DEFAULT_MAX_MATCHES: usize = 5;

/// Default minimum similarity for [`Session::search_student`].
pub const DEFAULT_MIN_RATING: f64 = 0.4;

/// A client session.
///
/// Starts unauthenticated; [`Session::login`] obtains a session id that is sent
/// as `JSESSIONID` cookie with every later call. Each session owns its own
/// response cache and request counter.
///
/// # Example
///
/// ```ignore
/// let config = SessionConfig::new("mese.webuntis.com", "demo", "user", "secret");
/// let mut session = Session::new(config)?;
/// session.login().await?;
/// let rooms = session.get_rooms().await?;
/// session.logout().await?;
/// ```
pub struct Session {
    config: SessionConfig,
    rpc: RpcClient,
    login_info: Option<LoginInfo>,
}

impl Session {
    /// Creates a session talking HTTPS to the configured server.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Creates a session on top of a custom transport.
    pub fn with_transport(config: SessionConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let cache = ResponseCache::new(
            config.cache.max_entries,
            ttl_from_minutes(config.cache.ttl_minutes),
        );
        let rpc = RpcClient::new(transport, config.endpoint_url()?, cache);

        Ok(Self {
            config,
            rpc,
            login_info: None,
        })
    }

    /// Authenticates with the configured credentials.
    ///
    /// # Returns
    /// * `Ok(LoginInfo)` - The identity the server reported for this user
    /// * `Err(UntisError::Rpc)` - If the credentials were rejected
    pub async fn login(&mut self) -> Result<LoginInfo> {
        let params = json!({
            "user": self.config.username,
            "password": self.config.password,
            "client": self.config.client_name,
        });
        let result = self.rpc.call("authenticate", params, false).await?;
        let (token, login_info) = parse::parse_login(&result)?;

        info!(
            server = %self.config.server,
            school = %self.config.school,
            session = %token,
            person = ?login_info.person,
            "Logged in"
        );

        self.rpc.set_session(Some(token));
        self.login_info = Some(login_info.clone());
        Ok(login_info)
    }

    /// Ends the session on the server and forgets the local identity.
    ///
    /// The local state is cleared even if the server call fails.
    pub async fn logout(&mut self) -> Result<()> {
        let result = self.rpc.call("logout", json!({}), false).await;

        self.login_info = None;
        self.rpc.set_session(None);
        info!(server = %self.config.server, "Logged out");

        result.map(|_| ())
    }

    /// Alias for [`Session::logout`].
    pub async fn quit(&mut self) -> Result<()> {
        self.logout().await
    }

    pub fn is_logged_in(&self) -> bool {
        self.rpc.session().is_some()
    }

    pub fn login_info(&self) -> Option<&LoginInfo> {
        self.login_info.as_ref()
    }

    /// Fetches the timetable of `element` between two dates (inclusive).
    ///
    /// Both dates default to today; `end` defaults to `start`.
    /// Fails with [`UntisError::InvalidArgument`] if `start` is after `end`.
    pub async fn get_timetable(
        &mut self,
        element: Id,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Period>> {
        self.get_timetable_with_cache(element, start, end, false).await
    }

    /// Like [`Session::get_timetable`], optionally served from the cache.
    pub async fn get_timetable_with_cache(
        &mut self,
        element: Id,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        use_cache: bool,
    ) -> Result<Vec<Period>> {
        let (start, end) = resolve_date_range(start, end, Local::now().date_naive())?;
        let params = json!({
            "id": element.id,
            "type": element.kind.code(),
            "startDate": compact_date(start),
            "endDate": compact_date(end),
        });

        let result = self.rpc.call("getTimetable", params, use_cache).await?;
        Ok(parse::parse_periods(&result))
    }

    /// Fetches the timetable of the logged-in student or teacher.
    pub async fn get_own_timetable(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Period>> {
        let person = self
            .login_info
            .as_ref()
            .and_then(|info| info.person)
            .ok_or_else(|| UntisError::NotLoggedIn {
                message: "the server reported no person for this login".to_string(),
            })?;

        self.get_timetable(person, start, end).await
    }

    /// Fetches the timetable and keeps only cancelled periods, in order.
    pub async fn get_cancellations(
        &mut self,
        element: Id,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Period>> {
        let periods = self.get_timetable(element, start, end).await?;
        Ok(periods.into_iter().filter(|p| p.is_cancelled).collect())
    }

    pub async fn get_subjects(&mut self) -> Result<Vec<Subject>> {
        let result = self.rpc.call("getSubjects", json!({}), true).await?;
        Ok(parse::parse_subjects(&result))
    }

    pub async fn get_students(&mut self) -> Result<Vec<Student>> {
        let result = self.rpc.call("getStudents", json!({}), true).await?;
        Ok(parse::parse_students(&result))
    }

    pub async fn get_teachers(&mut self) -> Result<Vec<Teacher>> {
        let result = self.rpc.call("getTeachers", json!({}), true).await?;
        Ok(parse::parse_teachers(&result))
    }

    pub async fn get_rooms(&mut self) -> Result<Vec<Room>> {
        let result = self.rpc.call("getRooms", json!({}), true).await?;
        Ok(parse::parse_rooms(&result))
    }

    /// Fetches the classes, of the current school year unless one is given.
    pub async fn get_klassen(&mut self, school_year: Option<i64>) -> Result<Vec<Klasse>> {
        let params = match school_year {
            Some(id) => json!({ "schoolyearId": id }),
            None => json!({}),
        };
        let result = self.rpc.call("getKlassen", params, true).await?;
        Ok(parse::parse_klassen(&result))
    }

    pub async fn get_school_years(&mut self) -> Result<Vec<SchoolYear>> {
        let result = self.rpc.call("getSchoolyears", json!({}), false).await?;
        Ok(parse::parse_school_years(&result))
    }

    /// Returns `None` outside of any school year.
    pub async fn get_current_school_year(&mut self) -> Result<Option<SchoolYear>> {
        let result = self.rpc.call("getCurrentSchoolyear", json!({}), false).await?;
        Ok(parse::parse_school_year(&result))
    }

    pub async fn get_time_grid(&mut self) -> Result<TimeGrid> {
        let result = self.rpc.call("getTimegridUnits", json!({}), true).await?;
        Ok(parse::parse_time_grid(&result))
    }

    pub async fn get_holidays(&mut self) -> Result<Vec<Holiday>> {
        let result = self.rpc.call("getHolidays", json!({}), true).await?;
        Ok(parse::parse_holidays(&result))
    }

    /// Time of the last data import on the server.
    pub async fn get_latest_import_time(&mut self) -> Result<DateTime<Utc>> {
        let result = self.rpc.call("getLatestImportTime", json!({}), false).await?;

        result
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| UntisError::Parse {
                message: format!("invalid import time: {result}"),
            })
    }

    /// Looks up the id of a teacher or student by exact name.
    ///
    /// Returns `None` if the server knows no such person.
    pub async fn search_person(
        &mut self,
        forename: &str,
        surname: &str,
        is_teacher: bool,
        birth_date: Option<NaiveDate>,
    ) -> Result<Option<Id>> {
        let kind = if is_teacher {
            ElementType::Teacher
        } else {
            ElementType::Student
        };
        let params = json!({
            "type": kind.code(),
            "sn": surname,
            "fn": forename,
            "dob": birth_date.map(compact_date).unwrap_or(0),
        });

        let result = self.rpc.call("getPersonId", params, false).await?;
        Ok(result
            .as_i64()
            .filter(|id| *id != 0)
            .map(|id| Id::new(kind, id)))
    }

    /// Finds students whose forename (or, if no forename is given, surname)
    /// resembles the given name.
    ///
    /// # Arguments
    /// * `max_matches` - Upper bound on returned students, must be positive
    /// * `min_rating` - Minimum similarity in `[0, 1]`
    ///
    /// # Returns
    /// * `Ok(None)` - No name given, or the student list could not be fetched
    /// * `Ok(Some(SearchMatches))` - Matches for the searched field, best first
    /// * `Err(UntisError::InvalidArgument)` - If the limits are out of range
    pub async fn search_student(
        &mut self,
        forename: Option<&str>,
        surname: Option<&str>,
        max_matches: usize,
        min_rating: f64,
    ) -> Result<Option<SearchMatches>> {
        if !(0.0..=1.0).contains(&min_rating) {
            return Err(UntisError::invalid_argument(format!(
                "min_rating must be between 0 and 1, got {min_rating}"
            )));
        }
        if max_matches == 0 {
            return Err(UntisError::invalid_argument("max_matches must be positive"));
        }

        let (target, by_forename) = match (forename, surname) {
            (Some(name), _) => (name, true),
            (None, Some(name)) => (name, false),
            (None, None) => return Ok(None),
        };

        let students = match self.get_students().await {
            Ok(students) => students,
            Err(e) if e.is_transport() => {
                warn!(error = %e, "Could not fetch students for search");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let names = students.iter().map(|student| {
            let name = if by_forename {
                &student.forename
            } else {
                &student.long_name
            };
            name.as_deref().unwrap_or("")
        });
        let matches: Vec<Student> = search::rank(target, names, max_matches, min_rating)
            .into_iter()
            .map(|rating| students[rating.index].clone())
            .collect();

        Ok(Some(if by_forename {
            SearchMatches {
                forename_matches: Some(matches),
                surname_matches: None,
            }
        } else {
            SearchMatches {
                forename_matches: None,
                surname_matches: Some(matches),
            }
        }))
    }

    /// Calls any RPC method and returns its raw `result`.
    pub async fn custom_request(
        &mut self,
        method: &str,
        params: Value,
        use_cache: bool,
    ) -> Result<Value> {
        self.rpc.call(method, params, use_cache).await
    }

    pub fn clear_cache(&mut self) {
        self.rpc.cache_mut().clear();
    }

    pub fn set_cache_ttl_minutes(&mut self, minutes: u64) {
        self.rpc.cache_mut().set_ttl(ttl_from_minutes(minutes));
    }

    /// Number of responses currently held in the cache.
    pub fn cached_responses(&self) -> usize {
        self.rpc.cache().len()
    }
}

/// Fills in missing dates and checks their order.
fn resolve_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = start.unwrap_or(today);
    let end = end.unwrap_or(start);

    if start > end {
        return Err(UntisError::invalid_argument(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use std::time::Duration;

    fn session(transport: &MockTransport) -> Session {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let config = SessionConfig::new("example.com", "demo", "user", "secret");
        Session::with_transport(config, Box::new(transport.clone())).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timetable() -> Value {
        json!([
            {"id": 1, "date": 20240115, "startTime": 800, "endTime": 845},
            {"id": 2, "date": 20240115, "startTime": 845, "endTime": 930, "code": "cancelled"},
            {"id": 3, "date": 20240115, "startTime": 950, "endTime": 1035, "code": "irregular"},
            {"id": 4, "date": 20240115, "startTime": 1035, "endTime": 1120, "code": "cancelled"}
        ])
    }

    #[test]
    fn test_resolve_date_range() {
        let today = date(2024, 1, 15);

        assert_eq!(resolve_date_range(None, None, today).unwrap(), (today, today));
        assert_eq!(
            resolve_date_range(Some(date(2024, 1, 10)), None, today).unwrap(),
            (date(2024, 1, 10), date(2024, 1, 10))
        );
        assert_eq!(
            resolve_date_range(None, Some(date(2024, 1, 20)), today).unwrap(),
            (today, date(2024, 1, 20))
        );
        assert!(resolve_date_range(Some(date(2024, 1, 16)), Some(date(2024, 1, 15)), today).is_err());
    }

    #[tokio::test]
    async fn test_login_stores_token_and_identity() {
        let transport = MockTransport::new();
        transport
            .push_result(json!({"sessionId": "SID1", "personType": 5, "personId": 42, "klasseId": 7}))
            .push_result(json!([]));
        let mut session = session(&transport);

        let info = session.login().await.unwrap();

        assert_eq!(info.person, Some(Id::student(42)));
        assert_eq!(info.klasse, Some(Id::klasse(7)));
        assert!(session.is_logged_in());

        let login = &transport.sent()[0];
        assert_eq!(login.body["method"], "authenticate");
        assert_eq!(login.body["params"]["user"], "user");
        assert_eq!(login.body["params"]["client"], "untis-rs");
        assert_eq!(login.session_id, None);

        session.get_rooms().await.unwrap();
        assert_eq!(transport.last_sent().session_id.as_deref(), Some("SID1"));
    }

    #[tokio::test]
    async fn test_rejected_login() {
        let transport = MockTransport::new();
        transport.push_error(json!({"code": -8504, "message": "bad credentials"}));
        let mut session = session(&transport);

        let err = session.login().await.unwrap_err();

        assert!(matches!(err, UntisError::Rpc { code: -8504, .. }));
        assert!(!session.is_logged_in());
        assert!(session.login_info().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let transport = MockTransport::new();
        transport
            .push_result(json!({"sessionId": "SID1", "personType": 2, "personId": 3}))
            .push_result(json!(null));
        let mut session = session(&transport);
        session.login().await.unwrap();

        session.logout().await.unwrap();

        assert_eq!(transport.last_sent().body["method"], "logout");
        assert_eq!(transport.last_sent().session_id.as_deref(), Some("SID1"));
        assert!(!session.is_logged_in());
        assert!(session.login_info().is_none());
    }

    #[tokio::test]
    async fn test_failed_logout_still_clears_local_state() {
        let transport = MockTransport::new();
        transport
            .push_result(json!({"sessionId": "SID1", "personType": 5, "personId": 8}))
            .push_error(json!({"code": -8520, "message": "not authenticated"}));
        let mut session = session(&transport);
        session.login().await.unwrap();

        let err = session.logout().await.unwrap_err();

        assert!(err.needs_login());
        assert!(!session.is_logged_in());
        assert!(session.login_info().is_none());
    }

    #[test]
    fn test_cache_limits_from_config() {
        let mut config = SessionConfig::new("example.com", "demo", "user", "secret");
        config.cache.max_entries = 7;
        config.cache.ttl_minutes = u64::MAX;
        let transport = MockTransport::new();
        let mut session = Session::with_transport(config, Box::new(transport)).unwrap();

        assert_eq!(session.rpc.cache().max_entries(), 7);
        assert_eq!(session.rpc.cache().ttl(), Duration::from_secs(u64::MAX));

        session.set_cache_ttl_minutes(u64::MAX / 2);
        assert_eq!(session.rpc.cache().ttl(), Duration::from_secs(u64::MAX));

        session.set_cache_ttl_minutes(5);
        assert_eq!(session.rpc.cache().ttl(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_timetable_params() {
        let transport = MockTransport::new();
        transport.push_result(timetable());
        let mut session = session(&transport);

        let periods = session
            .get_timetable(Id::klasse(71), Some(date(2024, 1, 15)), Some(date(2024, 1, 19)))
            .await
            .unwrap();

        assert_eq!(periods.len(), 4);
        let sent = transport.last_sent();
        assert_eq!(sent.body["method"], "getTimetable");
        assert_eq!(
            sent.body["params"],
            json!({"id": 71, "type": 1, "startDate": 20240115, "endDate": 20240119})
        );
    }

    #[tokio::test]
    async fn test_timetable_rejects_reversed_dates_before_network() {
        let transport = MockTransport::new();
        transport.push_result(timetable());
        let mut session = session(&transport);

        let err = session
            .get_timetable(Id::klasse(71), Some(date(2024, 1, 16)), Some(date(2024, 1, 15)))
            .await
            .unwrap_err();

        assert!(matches!(err, UntisError::InvalidArgument { .. }));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_timetable_is_not_cached_by_default() {
        let transport = MockTransport::new();
        transport.push_result(timetable());
        let mut session = session(&transport);
        let day = Some(date(2024, 1, 15));

        session.get_timetable(Id::room(1), day, day).await.unwrap();
        session.get_timetable(Id::room(1), day, day).await.unwrap();
        assert_eq!(transport.call_count(), 2);

        session.get_timetable_with_cache(Id::room(1), day, day, true).await.unwrap();
        session.get_timetable_with_cache(Id::room(1), day, day, true).await.unwrap();
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_cancellations_are_ordered_subset() {
        let transport = MockTransport::new();
        transport.push_result(timetable());
        let mut session = session(&transport);
        let day = Some(date(2024, 1, 15));

        let all = session.get_timetable(Id::klasse(1), day, day).await.unwrap();
        let cancelled = session.get_cancellations(Id::klasse(1), day, day).await.unwrap();

        let ids: Vec<i64> = cancelled.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(cancelled.iter().all(|p| all.contains(p) && p.is_cancelled));
    }

    #[tokio::test]
    async fn test_own_timetable_requires_login() {
        let transport = MockTransport::new();
        let mut session = session(&transport);

        let err = session.get_own_timetable(None, None).await.unwrap_err();
        assert!(matches!(err, UntisError::NotLoggedIn { .. }));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_students_served_from_cache() {
        let transport = MockTransport::new();
        transport.push_result(json!([{"id": 1, "foreName": "John", "longName": "Doe"}]));
        let mut session = session(&transport);

        let first = session.get_students().await.unwrap();
        let second = session.get_students().await.unwrap();

        assert_eq!(transport.call_count(), 1);
        assert_eq!(first, second);
        assert_eq!(session.cached_responses(), 1);
        assert_eq!(
            serde_json::to_string(&transport.sent()[0].body).unwrap(),
            r#"{"id":"req-1","jsonrpc":"2.0","method":"getStudents","params":{}}"#
        );

        session.clear_cache();
        session.get_students().await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_school_years_are_not_cached() {
        let transport = MockTransport::new();
        transport.push_result(json!({"id": 10, "name": "2023/2024"}));
        let mut session = session(&transport);

        session.get_current_school_year().await.unwrap();
        let year = session.get_current_school_year().await.unwrap().unwrap();

        assert_eq!(year.id, 10);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_klassen_school_year_param() {
        let transport = MockTransport::new();
        transport.push_result(json!([{"id": 1, "teacher1": 5}]));
        let mut session = session(&transport);

        let klassen = session.get_klassen(Some(10)).await.unwrap();

        assert_eq!(klassen[0].teachers, vec![Id::teacher(5)]);
        assert_eq!(transport.last_sent().body["params"], json!({"schoolyearId": 10}));
    }

    #[tokio::test]
    async fn test_time_grid() {
        let transport = MockTransport::new();
        transport.push_result(json!([{"day": 3, "timeUnits": [{"startTime": 800, "endTime": 845}]}]));
        let mut session = session(&transport);

        let grid = session.get_time_grid().await.unwrap();
        assert!(grid.wednesday().is_some());
        assert!(grid.monday().is_none());
    }

    #[tokio::test]
    async fn test_latest_import_time() {
        let transport = MockTransport::new();
        transport.push_result(json!(1705305600000_i64));
        let mut session = session(&transport);

        let time = session.get_latest_import_time().await.unwrap();
        assert_eq!(time.timestamp(), 1705305600);
    }

    #[tokio::test]
    async fn test_search_person() {
        let transport = MockTransport::new();
        transport.push_result(json!(17)).push_result(json!(0));
        let mut session = session(&transport);

        let found = session
            .search_person("Ann", "Smith", true, Some(date(1980, 2, 29)))
            .await
            .unwrap();
        assert_eq!(found, Some(Id::teacher(17)));
        assert_eq!(
            transport.last_sent().body["params"],
            json!({"type": 2, "sn": "Smith", "fn": "Ann", "dob": 19800229})
        );

        let missing = session.search_person("No", "Body", false, None).await.unwrap();
        assert_eq!(missing, None);
        assert_eq!(transport.last_sent().body["params"]["dob"], 0);
    }

    #[tokio::test]
    async fn test_search_student_by_forename() {
        let transport = MockTransport::new();
        transport.push_result(json!([
            {"id": 1, "foreName": "John", "longName": "Doe"},
            {"id": 2, "foreName": "Joanna", "longName": "Roe"},
            {"id": 3, "foreName": "Mark", "longName": "Jo"},
            {"id": 4, "foreName": "Jo", "longName": "Poe"}
        ]));
        let mut session = session(&transport);

        let matches = session
            .search_student(Some("Jo"), None, 3, 0.5)
            .await
            .unwrap()
            .unwrap();

        assert!(matches.surname_matches.is_none());
        let ids: Vec<Id> = matches
            .forename_matches
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![Id::student(4), Id::student(1)]);
    }

    #[tokio::test]
    async fn test_search_student_by_surname() {
        let transport = MockTransport::new();
        transport.push_result(json!([
            {"id": 1, "foreName": "John", "longName": "Doe"},
            {"id": 2, "foreName": "Jane"}
        ]));
        let mut session = session(&transport);

        let matches = session
            .search_student(None, Some("Doe"), DEFAULT_MAX_MATCHES, DEFAULT_MIN_RATING)
            .await
            .unwrap()
            .unwrap();

        assert!(matches.forename_matches.is_none());
        assert_eq!(matches.surname_matches.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_student_preconditions() {
        let transport = MockTransport::new();
        let mut session = session(&transport);

        for (max, min) in [(5, -0.1), (5, 1.1), (5, f64::NAN), (0, 0.5)] {
            let err = session.search_student(Some("Jo"), None, max, min).await.unwrap_err();
            assert!(matches!(err, UntisError::InvalidArgument { .. }));
        }
        assert_eq!(session.search_student(None, None, 5, 0.4).await.unwrap(), None);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_student_swallows_fetch_failure() {
        let transport = MockTransport::new();
        transport.push_error(json!({"code": -8520, "message": "not authenticated"}));
        let mut session = session(&transport);

        assert_eq!(session.search_student(Some("Jo"), None, 5, 0.4).await.unwrap(), None);

        let offline = MockTransport::new();
        let mut session = self::session(&offline);
        assert_eq!(session.search_student(Some("Jo"), None, 5, 0.4).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_custom_request() {
        let transport = MockTransport::new();
        transport.push_result(json!({"anything": [1, 2]}));
        let mut session = session(&transport);

        let result = session
            .custom_request("getStatusData", json!({"x": 1}), false)
            .await
            .unwrap();

        assert_eq!(result, json!({"anything": [1, 2]}));
        assert_eq!(transport.last_sent().body["method"], "getStatusData");
    }
}
