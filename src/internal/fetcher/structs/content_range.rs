//! `Content-Range` 响应头解析。

/// 解析后的 `Content-Range`：`bytes start-end/total` 或 `bytes */total`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// 本次返回的字节区间（含两端）；`bytes */total` 形式时为 `None`
    pub range: Option<(u64, u64)>,
    /// 资源完整大小；`/*` 形式时为 `None`
    pub total: Option<u64>,
}

impl ContentRange {
    /// 解析头部取值，格式不合法时返回 `None`。
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.trim().strip_prefix("bytes")?.trim_start();
        let (range_part, total_part) = rest.split_once('/')?;

        let total = match total_part.trim() {
            "*" => None,
            t => Some(t.parse::<u64>().ok()?),
        };

        let range = match range_part.trim() {
            "*" => None,
            r => {
                let (start, end) = r.split_once('-')?;
                let start = start.trim().parse::<u64>().ok()?;
                let end = end.trim().parse::<u64>().ok()?;
                if end < start {
                    return None;
                }
                Some((start, end))
            }
        };

        if range.is_none() && total.is_none() {
            return None;
        }
        Some(Self { range, total })
    }

    /// 本次返回区间的起点。
    pub fn start(&self) -> Option<u64> {
        self.range.map(|(start, _)| start)
    }
}

/// 生成开放式 Range 请求头：`bytes=start-`，始终请求到资源末尾。
pub fn open_range_header(start: u64) -> String {
    format!("bytes={}-", start)
}
