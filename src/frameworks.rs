//! Framework recognition (§4.7): a static catalog of known third-party
//! package prefixes, consulted so the inference strategies can tag a call
//! site as "into a recognized web/ORM/test framework" without having to
//! resolve the whole package.

/// One catalog row. `prefix` is matched against an FQN's leading
/// dot-or-slash-separated segments; the longest matching prefix wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameworkEntry {
    pub prefix: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

macro_rules! entry {
    ($prefix:expr, $name:expr, $category:expr) => {
        FrameworkEntry {
            prefix: $prefix,
            name: $name,
            category: $category,
        }
    };
}

const BUILTIN_CATALOG: &[FrameworkEntry] = &[
    // Python web frameworks
    entry!("django", "Django", "web"),
    entry!("flask", "Flask", "web"),
    entry!("fastapi", "FastAPI", "web"),
    entry!("starlette", "Starlette", "web"),
    entry!("tornado", "Tornado", "web"),
    entry!("pyramid", "Pyramid", "web"),
    entry!("bottle", "Bottle", "web"),
    entry!("aiohttp", "aiohttp", "web"),
    entry!("sanic", "Sanic", "web"),
    entry!("falcon", "Falcon", "web"),
    // Python ORM / data
    entry!("sqlalchemy", "SQLAlchemy", "orm"),
    entry!("django.db", "Django ORM", "orm"),
    entry!("peewee", "Peewee", "orm"),
    entry!("tortoise", "Tortoise ORM", "orm"),
    entry!("pydantic", "Pydantic", "validation"),
    entry!("marshmallow", "Marshmallow", "validation"),
    entry!("attr", "attrs", "validation"),
    entry!("dataclasses", "dataclasses", "validation"),
    // Python async / task queues
    entry!("celery", "Celery", "task-queue"),
    entry!("asyncio", "asyncio", "async"),
    entry!("trio", "Trio", "async"),
    entry!("rq", "RQ", "task-queue"),
    // Python HTTP clients / cloud SDKs
    entry!("requests", "Requests", "http-client"),
    entry!("httpx", "HTTPX", "http-client"),
    entry!("urllib3", "urllib3", "http-client"),
    entry!("boto3", "boto3", "cloud-sdk"),
    entry!("botocore", "botocore", "cloud-sdk"),
    entry!("google.cloud", "Google Cloud SDK", "cloud-sdk"),
    entry!("azure", "Azure SDK", "cloud-sdk"),
    // Python data science
    entry!("numpy", "NumPy", "data-science"),
    entry!("pandas", "pandas", "data-science"),
    entry!("scipy", "SciPy", "data-science"),
    entry!("sklearn", "scikit-learn", "data-science"),
    entry!("torch", "PyTorch", "data-science"),
    entry!("tensorflow", "TensorFlow", "data-science"),
    // Python test / CLI
    entry!("pytest", "pytest", "test"),
    entry!("unittest", "unittest", "test"),
    entry!("click", "Click", "cli"),
    entry!("typer", "Typer", "cli"),
    entry!("argparse", "argparse", "cli"),
    // Go web frameworks
    entry!("github.com/gin-gonic/gin", "Gin", "web"),
    entry!("github.com/labstack/echo", "Echo", "web"),
    entry!("github.com/gofiber/fiber", "Fiber", "web"),
    entry!("github.com/gorilla/mux", "gorilla/mux", "web"),
    entry!("github.com/go-chi/chi", "chi", "web"),
    entry!("github.com/valyala/fasthttp", "fasthttp", "web"),
    entry!("github.com/beego/beego", "Beego", "web"),
    entry!("github.com/revel/revel", "Revel", "web"),
    entry!("net/http", "net/http", "web"),
    // Go ORM / data
    entry!("gorm.io/gorm", "GORM", "orm"),
    entry!("github.com/jmoiron/sqlx", "sqlx", "orm"),
    entry!("database/sql", "database/sql", "orm"),
    entry!("go.mongodb.org/mongo-driver", "MongoDB Go Driver", "orm"),
    // Go RPC / messaging
    entry!("google.golang.org/grpc", "gRPC-Go", "rpc"),
    entry!("google.golang.org/protobuf", "protobuf-go", "serialization"),
    entry!("github.com/nats-io/nats.go", "NATS", "messaging"),
    entry!("github.com/segmentio/kafka-go", "kafka-go", "messaging"),
    // Go CLI / config / logging
    entry!("github.com/spf13/cobra", "Cobra", "cli"),
    entry!("github.com/spf13/viper", "Viper", "config"),
    entry!("go.uber.org/zap", "zap", "logging"),
    entry!("github.com/sirupsen/logrus", "logrus", "logging"),
    entry!("log/slog", "slog", "logging"),
    // Go test / cloud SDK
    entry!("github.com/stretchr/testify", "testify", "test"),
    entry!("github.com/aws/aws-sdk-go", "AWS SDK for Go", "cloud-sdk"),
    entry!("cloud.google.com/go", "Google Cloud Go SDK", "cloud-sdk"),
    entry!("k8s.io/client-go", "client-go", "cloud-sdk"),
];

/// The full set of known entries: the built-in catalog plus any
/// caller-supplied additions, consulted in a single longest-prefix-match
/// pass so extra entries can override or extend the built-ins.
pub struct FrameworkCatalog {
    entries: Vec<FrameworkEntry>,
}

impl Default for FrameworkCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameworkCatalog {
    pub fn new() -> Self {
        Self {
            entries: BUILTIN_CATALOG.to_vec(),
        }
    }

    /// Append caller-supplied entries after the built-in list. Still
    /// consulted in longest-prefix order, so a more specific caller entry
    /// (e.g. `django.db.models`) still wins over a shorter built-in one
    /// (`django`) regardless of which list it came from.
    pub fn with_extra(mut self, extra: impl IntoIterator<Item = FrameworkEntry>) -> Self {
        self.entries.extend(extra);
        self
    }

    pub fn is_known_framework(&self, fqn: &str) -> bool {
        self.lookup(fqn).is_some()
    }

    pub fn get_name(&self, fqn: &str) -> Option<&'static str> {
        self.lookup(fqn).map(|e| e.name)
    }

    pub fn get_category(&self, fqn: &str) -> Option<&'static str> {
        self.lookup(fqn).map(|e| e.category)
    }

    fn lookup(&self, fqn: &str) -> Option<&FrameworkEntry> {
        self.entries
            .iter()
            .filter(|e| fqn == e.prefix || fqn.starts_with(&format!("{}.", e.prefix)) || fqn.starts_with(&format!("{}/", e.prefix)))
            .max_by_key(|e| e.prefix.len())
    }
}
