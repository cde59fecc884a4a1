//! 诊断渲染器

use super::{Diagnostic, Severity};
use crate::util::span::SourceFile;
use owo_colors::OwoColorize;

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示源码片段
    pub show_source: bool,
    /// 指示字符 (默认: "^")
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            indicator: '^',
        }
    }
}

/// 文本诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Emitter without ANSI colors, e.g. for tests and piped output
    pub fn plain() -> Self {
        Self::with_config(EmitterConfig {
            use_colors: false,
            ..EmitterConfig::default()
        })
    }

    /// Render a diagnostic, optionally with a snippet of `source`
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
        source: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(diagnostic);

        let Some(span) = diagnostic.span.filter(|s| !s.is_dummy()) else {
            return output;
        };

        let file_name = source.map(|sf| sf.name.as_str()).unwrap_or("<input>");
        output.push_str(&format!(
            " --> {}:{}:{}\n",
            file_name, span.start.line, span.start.column
        ));

        if !self.config.show_source {
            return output;
        }
        if let Some(line) = source.and_then(|sf| sf.line(span.start.line)) {
            output.push_str(&format!("{:>4} | {}\n", span.start.line, line));
            let width = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column).max(1)
            } else {
                1
            };
            let carets = self.config.indicator.to_string().repeat(width);
            output.push_str(&format!(
                "     | {}{}\n",
                " ".repeat(span.start.column.saturating_sub(1)),
                self.paint(diagnostic.severity, &carets)
            ));
        }
        output
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let label = format!("{}[{}]", diagnostic.severity, diagnostic.category);
        format!(
            "{}: {}\n",
            self.paint(diagnostic.severity, &label),
            diagnostic.message
        )
    }

    fn paint(
        &self,
        severity: Severity,
        text: &str,
    ) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }
        match severity {
            Severity::Error => text.red().bold().to_string(),
            Severity::Warning => text.yellow().bold().to_string(),
            Severity::Note => text.cyan().to_string(),
        }
    }
}
