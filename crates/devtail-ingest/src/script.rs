//! Browser client script generation
//!
//! Renders the self-contained script a dev server injects into the page: it
//! wraps the configured console methods, batches entries, and delivers them
//! to the ingestion endpoint with `sendBeacon` (falling back to `fetch`).

use devtail_core::Options;

const CLIENT_TEMPLATE: &str = r#"(function() {
    var BATCH = [];
    var FLUSH_INTERVAL = __FLUSH_INTERVAL__;
    var MAX_BATCH = __MAX_BATCH__;
    var MAX_SERIALIZE = __MAX_SERIALIZE__;
    var ENDPOINT = __ENDPOINT__;
    var LEVELS = __LEVELS__;
    var CAPTURE_ERRORS = __CAPTURE_ERRORS__;
    var CAPTURE_REJECTIONS = __CAPTURE_REJECTIONS__;
    var timer = null;

    function serialize(arg) {
        if (arg === null) return "null";
        if (arg === undefined) return "undefined";
        if (arg instanceof Error) return arg.stack || arg.message || String(arg);
        if (typeof arg === "string") return arg;
        try {
            var s = JSON.stringify(arg, null, 2);
            return s.length > MAX_SERIALIZE ? s.slice(0, MAX_SERIALIZE) + "..." : s;
        } catch(e) {
            return String(arg);
        }
    }

    function get_timestamp() {
        var d = new Date();
        return d.toTimeString().slice(0, 8) + "." + String(d.getMilliseconds()).padStart(3, "0");
    }

    function queue(level, args, extra) {
        var entry = {
            level: level,
            args: Array.prototype.map.call(args, serialize),
            timestamp: get_timestamp()
        };
        if (extra) {
            if (extra.url) entry.url = extra.url;
            if (extra.stack) entry.stack = extra.stack;
        }
        BATCH.push(entry);
        if (BATCH.length >= MAX_BATCH) flush();
        else if (!timer) timer = setTimeout(flush, FLUSH_INTERVAL);
    }

    function flush() {
        if (timer) { clearTimeout(timer); timer = null; }
        if (!BATCH.length) return;
        var payload = JSON.stringify(BATCH);
        BATCH = [];
        try {
            navigator.sendBeacon(ENDPOINT, payload);
        } catch(e) {
            fetch(ENDPOINT, {
                method: "POST",
                headers: { "Content-Type": "application/json" },
                body: payload,
                keepalive: true
            }).catch(function() {});
        }
    }

    LEVELS.forEach(function(level) {
        var original = console[level];
        if (!original) return;
        console[level] = function() {
            queue(level, arguments);
            return original.apply(console, arguments);
        };
    });

    if (CAPTURE_ERRORS) {
        window.addEventListener("error", function(e) {
            queue("uncaught_error", [e.message], {
                url: e.filename + ":" + e.lineno + ":" + e.colno,
                stack: e.error && e.error.stack ? e.error.stack : undefined
            });
        });
    }

    if (CAPTURE_REJECTIONS) {
        window.addEventListener("unhandledrejection", function(e) {
            var reason = e.reason;
            var msg = reason instanceof Error ? reason.message : String(reason);
            var stack = reason instanceof Error ? reason.stack : undefined;
            queue("unhandled_rejection", [msg], { stack: stack });
        });
    }

    window.addEventListener("beforeunload", flush);
    window.addEventListener("pagehide", flush);
})();
"#;

/// Render the client script for the resolved options.
pub fn client_script(options: &Options) -> String {
    // Serializing plain strings and string lists cannot fail
    let endpoint = serde_json::to_string(&options.endpoint).expect("endpoint serializes");
    let levels = serde_json::to_string(&options.levels).expect("levels serialize");

    CLIENT_TEMPLATE
        .replace("__FLUSH_INTERVAL__", &options.flush_interval_ms.to_string())
        .replace("__MAX_BATCH__", &options.max_batch_size.to_string())
        .replace("__MAX_SERIALIZE__", &options.max_serialize_len.to_string())
        .replace("__ENDPOINT__", &endpoint)
        .replace("__LEVELS__", &levels)
        .replace("__CAPTURE_ERRORS__", bool_js(options.capture_errors))
        .replace("__CAPTURE_REJECTIONS__", bool_js(options.capture_rejections))
}

fn bool_js(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
