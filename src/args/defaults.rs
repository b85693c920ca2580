/// Identifying header sent with every probe request.
pub(crate) const DEFAULT_USER_AGENT: &str = "curl/7.68.0";

/// Lookup page for sampled request ids; `{reqid}` is replaced per entry.
pub(crate) const DEFAULT_TRACE_URL: &str = "https://setrace.dzeninfra.ru/ui/search/?reqid={reqid}";

pub(crate) const DEFAULT_DURATION: &str = "120s";
pub(crate) const DEFAULT_RATE: &str = "10000";
pub(crate) const DEFAULT_MAX_REQIDS: &str = "30";
pub(crate) const DEFAULT_THRESHOLDS: &str = "50,100,200,300";
pub(crate) const DEFAULT_POOL_MAX_IDLE_PER_HOST: &str = "100";
