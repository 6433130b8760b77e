//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dnspod_sync_provider::{
    DEFAULT_RECORD_LINE, DnspodApi, DnspodProvider, RecordPayload, RecordType,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// An enabled A record payload for `sub_domain`.
pub fn a_record_payload(domain_id: &str, sub_domain: &str, value: &str) -> RecordPayload {
    RecordPayload {
        domain_id: domain_id.to_string(),
        sub_domain: sub_domain.to_string(),
        record_type: RecordType::A,
        record_line: DEFAULT_RECORD_LINE.to_string(),
        value: value.to_string(),
        mx: None,
        ttl: 600,
        weight: None,
        status: "enable".to_string(),
    }
}

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: DnspodProvider,
    pub domain: String,
    pub domain_id: Option<String>,
}

impl TestContext {
    /// 从 `DNSPOD_LOGIN_TOKEN` / `TEST_DOMAIN` 创建测试上下文
    pub fn from_env() -> Option<Self> {
        let login_token = env::var("DNSPOD_LOGIN_TOKEN").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let provider = DnspodProvider::new(login_token).ok()?;

        Some(Self {
            provider,
            domain,
            domain_id: None,
        })
    }

    /// 查找测试域名对应的 domain_id（结果缓存）
    pub async fn find_domain_id(&mut self) -> Option<String> {
        if let Some(id) = &self.domain_id {
            return Some(id.clone());
        }
        let domains = self.provider.list_domains().await.ok()?;
        let id = domains.into_iter().find(|d| d.name == self.domain)?.id;
        self.domain_id = Some(id.clone());
        Some(id)
    }
}
