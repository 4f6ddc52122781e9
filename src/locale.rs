//! Locales and the per-locale string catalog.
//!
//! The core never branches on locale content: every user-facing string it
//! emits is looked up in the [`Catalog`] for the active [`Locale`]. Adding a
//! locale means one enum variant and one catalog value.

use crate::stack::InstallStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::ZhCn => "zh-CN",
        }
    }

    pub fn all() -> &'static [Locale] {
        &[Locale::EnUs, Locale::ZhCn]
    }

    pub fn catalog(&self) -> &'static Catalog {
        match self {
            Locale::EnUs => &EN_US,
            Locale::ZhCn => &ZH_CN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::all()
            .iter()
            .copied()
            .find(|l| l.as_tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid locale: {}. Valid options: {}",
                    s,
                    Locale::all()
                        .iter()
                        .map(Locale::as_tag)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Every user-facing string the core emits, for one locale
#[derive(Debug)]
pub struct Catalog {
    pub status_installed: &'static str,
    pub status_missing: &'static str,
    pub status_corrupted: &'static str,
    pub status_pending: &'static str,

    /// System instruction sent with every remote analysis request
    pub persona: &'static str,
    /// User prompt; `{name}` and `{status}` are substituted
    pub prompt_template: &'static str,
    /// Shown when neither the remote service nor local intel has an answer
    pub severed_link: &'static str,

    pub log_init: &'static str,
    pub log_ready: &'static str,
    pub log_start_scan: &'static str,
    pub log_scan_complete: &'static str,
    pub log_manifest_loaded: &'static str,
    pub log_demo_loaded: &'static str,
    pub log_deps_detected: &'static str,
    pub log_parse_error: &'static str,
    pub log_empty_manifest: &'static str,
    pub log_offline_fallback: &'static str,
    pub log_lang_change: &'static str,
    pub log_item_added: &'static str,
    pub log_item_updated: &'static str,
    pub log_item_removed: &'static str,
    pub log_status_toggled: &'static str,
}

impl Catalog {
    pub fn status_label(&self, status: InstallStatus) -> &'static str {
        match status {
            InstallStatus::Installed => self.status_installed,
            InstallStatus::Missing => self.status_missing,
            InstallStatus::Corrupted => self.status_corrupted,
            InstallStatus::Pending => self.status_pending,
        }
    }

    /// Fills `{name}` and `{status}` in one left-to-right pass, so braces
    /// inside the substituted values are copied through untouched.
    pub fn render_prompt(&self, name: &str, status: &str) -> String {
        let mut out = String::with_capacity(self.prompt_template.len() + name.len() + status.len());
        let mut rest = self.prompt_template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(after) = tail.strip_prefix("{name}") {
                out.push_str(name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{status}") {
                out.push_str(status);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

static EN_US: Catalog = Catalog {
    status_installed: "DETECTED",
    status_missing: "MISSING",
    status_corrupted: "CORRUPTED",
    status_pending: "PENDING",

    persona: "You are an elite Netrunner from Cyberpunk 2077.\n\
You are analyzing system components (dev frameworks, DBs, runtimes) of a Windows terminal via your cyberdeck.\n\
Your response must be short, hardcore, and full of Cyberpunk slang (e.g., Chrome, ICE, Daemons, Arasaka, NetWatch, BD, Jack-in, Neural Slot).\n\
Do not use polite customer service tone. Speak like a veteran of the Night City streets.\n\
Analyze the tech component and explain its strategic value in the stack using metaphors as if it were a powerful cyberware implant or hacking tool.\n\
Must reply in English.",
    prompt_template: "Analyze target component: {name}. Current Install Status: {status}. \
Provide tactical assessment (Windows environment, max 50 words).",
    severed_link: "Link severed. Signal lost. No local intel on this component.",

    log_init: "Initializing System Overseer...",
    log_ready: "System Ready. Awaiting dependency scan.",
    log_start_scan: "INITIATING COMPONENT ANALYSIS",
    log_scan_complete: "Analysis Complete. Intel uploaded.",
    log_manifest_loaded: "Manifest Loaded Successfully.",
    log_demo_loaded: "Simulation Environment Loaded.",
    log_deps_detected: "Dependencies Detected:",
    log_parse_error: "Manifest Parse Failure: Invalid JSON",
    log_empty_manifest: "Scan Warning: No dependencies found in manifest.",
    log_offline_fallback: "AI Link Offline. Accessing Local Intel DB.",
    log_lang_change: "Language Core Changed",
    log_item_added: "Module registered",
    log_item_updated: "Module reconfigured",
    log_item_removed: "Module purged",
    log_status_toggled: "Module status switched",
};

static ZH_CN: Catalog = Catalog {
    status_installed: "已检测",
    status_missing: "未检测到",
    status_corrupted: "已损坏",
    status_pending: "等待中",

    persona: "你是一个来自《赛博朋克2077》的精英黑客（Netrunner）。\n\
你正在通过接入仓分析这台 Windows 终端的系统组件（开发框架、数据库、运行时）。\n\
你的回复必须简短、硬核、带有赛博朋克风格的黑话（比如：义体、ICE、守护进程、荒坂、网络监察、漩涡帮、超梦、接入、神经插槽）。\n\
不要使用礼貌的客服语气。要像一个在夜之城街头混迹多年的老手。\n\
分析提供的技术组件，并用比喻的方式解释它在软件堆栈中的战略价值，就像它是一个强力的义体插件或黑客破解工具。\n\
必须使用中文回复。",
    prompt_template: "分析目标组件: {name}。当前安装状态: {status}。请提供战术评估（Windows环境，最大50字）。",
    severed_link: "黑客连接中断。信号丢失。本地情报库无此组件记录。",

    log_init: "正在初始化系统监视器...",
    log_ready: "系统就绪。等待依赖扫描。",
    log_start_scan: "启动组件分析",
    log_scan_complete: "分析完成. 情报已上传。",
    log_manifest_loaded: "Manifest清单已加载。",
    log_demo_loaded: "已加载模拟环境数据。",
    log_deps_detected: "检测到依赖项:",
    log_parse_error: "清单解析失败: JSON 格式错误",
    log_empty_manifest: "扫描警告: 清单中未发现依赖项。",
    log_offline_fallback: "AI 链路离线。调用本地情报库。",
    log_lang_change: "语言核心变更",
    log_item_added: "模块已注册",
    log_item_updated: "模块已重新配置",
    log_item_removed: "模块已清除",
    log_status_toggled: "模块状态已切换",
};
