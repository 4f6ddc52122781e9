//! Offline intel: canned flavor text used when the remote analysis link is down.
//!
//! Entries are matched by case-insensitive substring against the item name, in
//! table order, so `"react-native"` resolves to the `react` entry and
//! `"expressive-ui"` to `express`.

use crate::locale::Locale;

pub struct IntelEntry {
    pub key: &'static str,
    pub texts: &'static [(Locale, &'static str)],
}

impl IntelEntry {
    pub fn text(&self, locale: Locale) -> Option<&'static str> {
        self.texts
            .iter()
            .find(|(l, _)| *l == locale)
            .map(|(_, text)| *text)
    }
}

pub const KNOWLEDGE_BASE: &[IntelEntry] = &[
    IntelEntry {
        key: "react",
        texts: &[
            (Locale::ZhCn, "前端核心义体。利用虚拟DOM构建高频响应的UI界面，如同神经反射般迅速。组件化设计允许快速更换受损模块。"),
            (Locale::EnUs, "Frontend core cyberware. Utilizes Virtual DOM for high-reflex UI responses. Component-based design allows hot-swapping of damaged modules."),
        ],
    },
    IntelEntry {
        key: "node.js",
        texts: &[
            (Locale::ZhCn, "服务器端运行时引擎。基于V8的高速处理核心，能够维持大量并发连接，是网络黑客维持长时间潜入的必备基础。"),
            (Locale::EnUs, "Server-side runtime engine. V8-based high-speed core capable of sustaining massive concurrent connections. Essential for long-duration netruns."),
        ],
    },
    IntelEntry {
        key: "typescript",
        texts: &[
            (Locale::ZhCn, "强类型编译协议。为代码注入严格的结构化逻辑，有效防御运行时的数据溢出和逻辑漏洞，属于高级ICE防御层。"),
            (Locale::EnUs, "Strongly typed compilation protocol. Injects strict structural logic to prevent runtime data overflows. Classified as advanced ICE defense."),
        ],
    },
    IntelEntry {
        key: "docker",
        texts: &[
            (Locale::ZhCn, "隔离容器技术。将应用程序封装在独立的微型环境中，防止病毒交叉感染，便于在不同服务器节点间快速部署和撤离。"),
            (Locale::EnUs, "Isolation container tech. Encapsulates apps in independent micro-environments to prevent cross-infection. Enables rapid deployment and extraction."),
        ],
    },
    IntelEntry {
        key: "mongodb",
        texts: &[
            (Locale::ZhCn, "非关系型数据仓库。以文档形式存储海量非结构化情报，查询速度极快，适合处理来自街头监控的杂乱数据流。"),
            (Locale::EnUs, "NoSQL data warehouse. Stores massive unstructured intel as documents. Blazing fast query speed, perfect for processing chaotic street data."),
        ],
    },
    IntelEntry {
        key: "mysql",
        texts: &[
            (Locale::ZhCn, "经典关系型数据库。结构严谨的旧时代遗物，但极其可靠。如同荒坂公司的金库，通过严格的表结构锁定每一位数据。"),
            (Locale::EnUs, "Classic RDBMS. Structured relic of the old net, but incredibly reliable. Like an Arasaka vault, locking down every bit via strict table structures."),
        ],
    },
    IntelEntry {
        key: "vue",
        texts: &[
            (Locale::ZhCn, "渐进式前端框架。轻量级义体，适应性极强。可以像插件一样集成到现有系统中，提供双向数据绑定的即时反馈。"),
            (Locale::EnUs, "Progressive frontend framework. Lightweight cyberware with high adaptability. Integrates like a plugin for immediate two-way data binding feedback."),
        ],
    },
    IntelEntry {
        key: "express",
        texts: &[
            (Locale::ZhCn, "极简后端路由框架。快速构建API通道的骨架工具。没有多余的装饰，只有纯粹的速度和灵活性，适合快速搭建临时中继站。"),
            (Locale::EnUs, "Minimalist backend routing framework. Skeleton tool for rapid API tunneling. No frills, just pure speed and flexibility for temporary relay stations."),
        ],
    },
];

/// Returns the first entry whose key occurs in `name`, ignoring case.
pub fn find_entry(name: &str) -> Option<&'static IntelEntry> {
    let lower = name.to_lowercase();
    KNOWLEDGE_BASE.iter().find(|entry| lower.contains(entry.key))
}

/// Offline flavor text for `name` in `locale`, if the knowledge base has any.
pub fn lookup_offline(name: &str, locale: Locale) -> Option<&'static str> {
    find_entry(name).and_then(|entry| entry.text(locale))
}
