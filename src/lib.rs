//! # 拼版打印工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   CLI (clap) → 配置合并 (默认 → JSON → 参数)     │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<_, AppError>
//! ┌───────┴──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  ├─ settings ─── JSON 配置覆盖 (serde)                    │
//! │  ├─ storage ──── 输出目录 + 临时文件原子写入              │
//! │  └─ collage ──── 取样·扩边·白边·缩放·拼版·导出            │
//! │      ├─ handler       批次编排                            │
//! │      ├─ pipeline      单图流水线 (fast_image_resize)      │
//! │      └─ export        PNG / PDF (lopdf) / SVG / AI(EPS)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，`main` 的返回错误 |
//! | [`collage`] | 从图片目录生成固定尺寸的拼版画布 |
//! | [`settings`] | 读取可选的 JSON 配置文件并覆盖默认配置 |
//! | [`storage`] | 输出目录创建、输出文件命名与原子写入 |

pub mod error;
pub mod collage;
pub mod settings;
pub mod storage;
