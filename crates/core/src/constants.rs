//! Well-known identifiers, formats and defaults of the dashboard schema.

// Tooltip value types
pub const INDIVIDUAL: &str = "individual";
pub const CUMULATIVE: &str = "cumulative";

// Null point modes
pub const NULL_CONNECTED: &str = "connected";
pub const NULL_AS_ZERO: &str = "null as zero";
pub const NULL_AS_NULL: &str = "null";

// Renderers and threshold modes
pub const FLOT: &str = "flot";
pub const ABSOLUTE_TYPE: &str = "absolute";

// ---------------------------------------------------------------------------
// Panel type identifiers
// ---------------------------------------------------------------------------

pub const ROW_TYPE: &str = "row";
pub const GRAPH_TYPE: &str = "graph";
pub const DISCRETE_TYPE: &str = "natel-discrete-panel";
pub const EPICT_TYPE: &str = "larona-epict-panel";
pub const STAT_TYPE: &str = "stat";
pub const SINGLESTAT_TYPE: &str = "singlestat";
pub const STATE_TIMELINE_TYPE: &str = "state-timeline";
pub const TABLE_TYPE: &str = "table";
pub const TEXT_TYPE: &str = "text";
pub const ALERTLIST_TYPE: &str = "alertlist";
pub const BARGAUGE_TYPE: &str = "bargauge";
pub const GAUGE_TYPE: &str = "gauge";
pub const DASHBOARDLIST_TYPE: &str = "dashlist";
pub const LOGS_TYPE: &str = "logs";
pub const HEATMAP_TYPE: &str = "heatmap";
pub const STATUSMAP_TYPE: &str = "flant-statusmap-panel";
pub const SVG_TYPE: &str = "marcuscalidus-svg-panel";
pub const PIE_CHART_TYPE: &str = "grafana-piechart-panel";
pub const PIE_CHART_V2_TYPE: &str = "piechart";
pub const TIMESERIES_TYPE: &str = "timeseries";
pub const WORLD_MAP_TYPE: &str = "grafana-worldmap-panel";
pub const NEWS_TYPE: &str = "news";
pub const HISTOGRAM_TYPE: &str = "histogram";
pub const AE3E_PLOTLY_TYPE: &str = "ae3e-plotly-panel";
pub const BAR_CHART_TYPE: &str = "barchart";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_FILL: u32 = 1;
pub const DEFAULT_REFRESH: &str = "10s";
pub const DEFAULT_ALERT_EVALUATE_INTERVAL: &str = "1m";
pub const DEFAULT_ALERT_EVALUATE_FOR: &str = "5m";
pub const DEFAULT_RENDERER: &str = FLOT;
pub const DEFAULT_LINE_WIDTH: u32 = 2;
pub const DEFAULT_POINT_RADIUS: u32 = 5;
pub const DEFAULT_STEP: u32 = 10;
pub const DEFAULT_LIMIT: u32 = 10;
pub const TOTAL_SPAN: u32 = 12;
pub const DARK_STYLE: &str = "dark";
pub const LIGHT_STYLE: &str = "light";
pub const UTC: &str = "utc";
pub const SCHEMA_VERSION: u32 = 12;

// ---------------------------------------------------------------------------
// Y axis formats
// ---------------------------------------------------------------------------

pub const DURATION_FORMAT: &str = "dtdurations";
pub const NO_FORMAT: &str = "none";
pub const OPS_FORMAT: &str = "ops";
pub const PERCENT_UNIT_FORMAT: &str = "percentunit";
pub const DAYS_FORMAT: &str = "d";
pub const HOURS_FORMAT: &str = "h";
pub const MINUTES_FORMAT: &str = "m";
pub const SECONDS_FORMAT: &str = "s";
pub const MILLISECONDS_FORMAT: &str = "ms";
pub const SHORT_FORMAT: &str = "short";
pub const BYTES_FORMAT: &str = "bytes";
pub const BITS_PER_SEC_FORMAT: &str = "bps";
pub const BYTES_PER_SEC_FORMAT: &str = "Bps";
pub const NONE_FORMAT: &str = "none";
pub const JOULE_FORMAT: &str = "joule";
pub const WATTHOUR_FORMAT: &str = "watth";
pub const WATT_FORMAT: &str = "watt";
pub const KWATT_FORMAT: &str = "kwatt";
pub const KWATTHOUR_FORMAT: &str = "kwatth";
pub const VOLT_FORMAT: &str = "volt";
pub const BAR_FORMAT: &str = "pressurebar";
pub const PSI_FORMAT: &str = "pressurepsi";
pub const CELSIUS_FORMAT: &str = "celsius";
pub const KELVIN_FORMAT: &str = "kelvin";
pub const GRAM_FORMAT: &str = "massg";
pub const EUR_FORMAT: &str = "currencyEUR";
pub const USD_FORMAT: &str = "currencyUSD";
pub const METER_FORMAT: &str = "lengthm";
pub const SQUARE_METER_FORMAT: &str = "areaM2";
pub const CUBIC_METER_FORMAT: &str = "m3";
pub const LITRE_FORMAT: &str = "litre";
pub const PERCENT_FORMAT: &str = "percent";
pub const VOLT_AMPERE_FORMAT: &str = "voltamp";

// ---------------------------------------------------------------------------
// Alerting
// ---------------------------------------------------------------------------

// Alert rule state
pub const STATE_NO_DATA: &str = "no_data";
pub const STATE_ALERTING: &str = "alerting";
pub const STATE_KEEP_LAST_STATE: &str = "keep_state";
pub const STATE_OK: &str = "ok";

// Evaluator
pub const EVAL_GT: &str = "gt";
pub const EVAL_LT: &str = "lt";
pub const EVAL_WITHIN_RANGE: &str = "within_range";
pub const EVAL_OUTSIDE_RANGE: &str = "outside_range";
pub const EVAL_NO_VALUE: &str = "no_value";

// Reducer type
pub const RTYPE_AVG: &str = "avg";
pub const RTYPE_MIN: &str = "min";
pub const RTYPE_MAX: &str = "max";
pub const RTYPE_SUM: &str = "sum";
pub const RTYPE_COUNT: &str = "count";
pub const RTYPE_LAST: &str = "last";
pub const RTYPE_MEDIAN: &str = "median";
pub const RTYPE_DIFF: &str = "diff";
pub const RTYPE_PERCENT_DIFF: &str = "percent_diff";
pub const RTYPE_COUNT_NON_NULL: &str = "count_non_null";

// Condition type
pub const CTYPE_QUERY: &str = "query";

// Operator
pub const OP_AND: &str = "and";
pub const OP_OR: &str = "or";

// Alert expression types
pub const EXP_TYPE_CLASSIC: &str = "classic_conditions";
pub const EXP_TYPE_REDUCE: &str = "reduce";
pub const EXP_TYPE_RESAMPLE: &str = "resample";
pub const EXP_TYPE_MATH: &str = "math";

// Alert expression reducer function
pub const EXP_REDUCER_FUNC_MIN: &str = "min";
pub const EXP_REDUCER_FUNC_MAX: &str = "max";
pub const EXP_REDUCER_FUNC_MEAN: &str = "mean";
pub const EXP_REDUCER_FUNC_SUM: &str = "sum";
pub const EXP_REDUCER_FUNC_COUNT: &str = "count";
pub const EXP_REDUCER_FUNC_LAST: &str = "last";

// Alert expression reducer mode
pub const EXP_REDUCER_MODE_STRICT: &str = "strict";
pub const EXP_REDUCER_FUNC_DROP_NN: &str = "dropNN";
pub const EXP_REDUCER_FUNC_REPLACE_NN: &str = "replaceNN";

// ---------------------------------------------------------------------------
// Miscellaneous panel options
// ---------------------------------------------------------------------------

// Text panel modes
pub const TEXT_MODE_MARKDOWN: &str = "markdown";
pub const TEXT_MODE_HTML: &str = "html";
pub const TEXT_MODE_TEXT: &str = "text";

// Datasource plugins
pub const PLUGIN_ID_GRAPHITE: &str = "graphite";
pub const PLUGIN_ID_PROMETHEUS: &str = "prometheus";
pub const PLUGIN_ID_INFLUXDB: &str = "influxdb";
pub const PLUGIN_ID_OPENTSDB: &str = "opentsdb";
pub const PLUGIN_ID_ELASTICSEARCH: &str = "elasticsearch";
pub const PLUGIN_ID_CLOUDWATCH: &str = "cloudwatch";

// Target formats
pub const TIME_SERIES_TARGET_FORMAT: &str = "time_series";
pub const TABLE_TARGET_FORMAT: &str = "table";

// Table transforms
pub const AGGREGATIONS_TRANSFORM: &str = "timeseries_aggregations";
pub const ANNOTATIONS_TRANSFORM: &str = "annotations";
pub const COLUMNS_TRANSFORM: &str = "timeseries_to_columns";
pub const JSON_TRANSFORM: &str = "json";
pub const ROWS_TRANSFORM: &str = "timeseries_to_rows";
pub const TABLE_TRANSFORM: &str = "table";

// Alert list show selections
pub const ALERTLIST_SHOW_CURRENT: &str = "current";
pub const ALERTLIST_SHOW_CHANGES: &str = "changes";

// Alert list state filter options
pub const ALERTLIST_STATE_OK: &str = "ok";
pub const ALERTLIST_STATE_PAUSED: &str = "paused";
pub const ALERTLIST_STATE_NO_DATA: &str = "no_data";
pub const ALERTLIST_STATE_EXECUTION_ERROR: &str = "execution_error";
pub const ALERTLIST_STATE_ALERTING: &str = "alerting";
pub const ALERTLIST_STATE_PENDING: &str = "pending";

// Unified alert rule states
pub const ALERTRULE_STATE_DATA_OK: &str = "OK";
pub const ALERTRULE_STATE_DATA_NODATA: &str = "No Data";
pub const ALERTRULE_STATE_DATA_ALERTING: &str = "Alerting";
pub const ALERTRULE_STATE_DATA_ERROR: &str = "Error";

// Display sort order
pub const SORT_ASC: i64 = 1;
pub const SORT_DESC: i64 = 2;
pub const SORT_IMPORTANCE: i64 = 3;

// Template refresh
pub const REFRESH_NEVER: i64 = 0;
pub const REFRESH_ON_DASHBOARD_LOAD: i64 = 1;
pub const REFRESH_ON_TIME_RANGE_CHANGE: i64 = 2;

// Template visibility
pub const SHOW: i64 = 0;
pub const HIDE_LABEL: i64 = 1;
pub const HIDE_VARIABLE: i64 = 2;

// Template option sort
pub const SORT_DISABLED: i64 = 0;
pub const SORT_ALPHA_ASC: i64 = 1;
pub const SORT_ALPHA_DESC: i64 = 2;
pub const SORT_NUMERIC_ASC: i64 = 3;
pub const SORT_NUMERIC_DESC: i64 = 4;
pub const SORT_ALPHA_IGNORE_CASE_ASC: i64 = 5;
pub const SORT_ALPHA_IGNORE_CASE_DESC: i64 = 6;

// Gauge reducers
pub const GAUGE_CALC_LAST: &str = "last";
pub const GAUGE_CALC_FIRST: &str = "first";
pub const GAUGE_CALC_MIN: &str = "min";
pub const GAUGE_CALC_MAX: &str = "max";
pub const GAUGE_CALC_MEAN: &str = "mean";
pub const GAUGE_CALC_TOTAL: &str = "sum";
pub const GAUGE_CALC_COUNT: &str = "count";
pub const GAUGE_CALC_RANGE: &str = "range";
pub const GAUGE_CALC_DELTA: &str = "delta";
pub const GAUGE_CALC_STEP: &str = "step";
pub const GAUGE_CALC_DIFFERENCE: &str = "difference";
pub const GAUGE_CALC_LOGMIN: &str = "logmin";
pub const GAUGE_CALC_CHANGE_COUNT: &str = "changeCount";
pub const GAUGE_CALC_DISTINCT_COUNT: &str = "distinctCount";

// Orientation
pub const ORIENTATION_HORIZONTAL: &str = "horizontal";
pub const ORIENTATION_VERTICAL: &str = "vertical";
pub const ORIENTATION_AUTO: &str = "auto";

// Gauge display modes
pub const GAUGE_DISPLAY_MODE_BASIC: &str = "basic";
pub const GAUGE_DISPLAY_MODE_LCD: &str = "lcd";
pub const GAUGE_DISPLAY_MODE_GRADIENT: &str = "gradient";

// Dashboard graph tooltip modes
pub const GRAPH_TOOLTIP_MODE_NOT_SHARED: i64 = 0;
pub const GRAPH_TOOLTIP_MODE_SHARED_CROSSHAIR: i64 = 1;
/// Shared crosshair and tooltip.
pub const GRAPH_TOOLTIP_MODE_SHARED_TOOLTIP: i64 = 2;

// Interval template defaults
pub const DEFAULT_AUTO_COUNT: u32 = 30;
pub const DEFAULT_MIN_AUTO_INTERVAL: &str = "10s";

// Stat value types
pub const VTYPE_MIN: &str = "min";
pub const VTYPE_MAX: &str = "max";
pub const VTYPE_AVG: &str = "avg";
pub const VTYPE_CURR: &str = "current";
pub const VTYPE_TOTAL: &str = "total";
pub const VTYPE_NAME: &str = "name";
pub const VTYPE_FIRST: &str = "first";
pub const VTYPE_DELTA: &str = "delta";
pub const VTYPE_RANGE: &str = "range";
pub const VTYPE_DEFAULT: &str = VTYPE_AVG;

// Value mapping types
pub const MAPPING_TYPE_VALUE_TO_TEXT: i64 = 1;
pub const MAPPING_TYPE_RANGE_TO_TEXT: i64 = 2;
