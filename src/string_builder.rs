//! 语句文本拼接工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 依次写入 `items`，相邻两项之间写入 `sep`。
    pub(crate) fn write_joined<I, S>(&mut self, items: I, sep: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, s) in items.into_iter().enumerate() {
            if i > 0 {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s.as_ref());
        }
    }

    /// 以语句分隔符结束并返回文本。
    pub(crate) fn finish(mut self) -> String {
        self.buf.push(';');
        self.buf
    }
}
