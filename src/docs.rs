//! Markdown documentation of the HTTP routes, served at `GET /`.

use std::fmt::Write;

/// One documented route.
#[derive(Debug, Clone, Copy)]
pub struct RouteDoc {
    pub methods: &'static str,
    pub path: &'static str,
    pub middleware: &'static [&'static str],
    pub summary: &'static str,
}

/// Every route the router registers, in registration order.
pub const ROUTES: &[RouteDoc] = &[
    RouteDoc { methods: "GET", path: "/", middleware: &[], summary: "This document." },
    RouteDoc { methods: "GET", path: "/health", middleware: &[], summary: "Liveness probe." },
    RouteDoc { methods: "GET", path: "/readyz", middleware: &[], summary: "Readiness probe (database ping)." },
    RouteDoc { methods: "GET", path: "/version", middleware: &[], summary: "Build information." },
    RouteDoc {
        methods: "GET",
        path: "/articles",
        middleware: &["paginate"],
        summary: "List all articles.",
    },
    RouteDoc {
        methods: "POST",
        path: "/articles",
        middleware: &[],
        summary: "Create an article. Any `id` in the body is ignored.",
    },
    RouteDoc {
        methods: "GET",
        path: "/articles/search",
        middleware: &[],
        summary: "Search articles (stub: returns every article).",
    },
    RouteDoc {
        methods: "GET, PUT, DELETE",
        path: "/articles/{article_id}",
        middleware: &["article_ctx"],
        summary: "Fetch, update or delete one article. Unknown ids return 404.",
    },
    RouteDoc {
        methods: "GET",
        path: "/taxpro/{year}/{efin}",
        middleware: &[],
        summary: "Look up a tax professional for a season.",
    },
    RouteDoc {
        methods: "GET, HEAD",
        path: "/admin",
        middleware: &["admin_only"],
        summary: "Admin index. Any other path under `/admin` is 403 without the capability, 404 with it.",
    },
    RouteDoc {
        methods: "GET, HEAD",
        path: "/admin/accounts",
        middleware: &["admin_only"],
        summary: "List accounts.",
    },
    RouteDoc {
        methods: "GET, HEAD",
        path: "/admin/users/{user_id}",
        middleware: &["admin_only"],
        summary: "View one user.",
    },
];

/// Router-wide layers, outermost first, as `routes::router` installs them.
pub const GLOBAL_MIDDLEWARE: &[&str] = &[
    "request_id",
    "trace",
    "request_id_propagation",
    "compression",
    "body_limit",
    "catch_panic",
    "request_timeout",
    "concurrency_limit",
    "rate_limit",
    "coalesce",
    "acl",
];

pub fn markdown() -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", env!("CARGO_PKG_NAME"));
    let _ = writeln!(md, "Welcome to the {} generated route docs.\n", env!("CARGO_PKG_NAME"));
    let _ = writeln!(md, "Every request passes through: {}.\n", GLOBAL_MIDDLEWARE.join(", "));
    let _ = writeln!(md, "## Routes\n");
    for route in ROUTES {
        let _ = writeln!(md, "### `{}` {}\n", route.path, route.methods);
        let _ = writeln!(md, "{}\n", route.summary);
        if !route.middleware.is_empty() {
            let _ = writeln!(md, "- middleware: {}\n", route.middleware.join(", "));
        }
    }
    md
}
