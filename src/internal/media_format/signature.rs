use std::fmt;

/// 判断格式需要的字节数；不足时一律视为未知。
pub const SNIFF_LEN: usize = 36;

/// EBML 头（WebM / Matroska），位于偏移 0。
const WEBM_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];
/// Ogg 页头，位于偏移 0。
const OGG_MAGIC: &[u8; 4] = b"OggS";
/// Opus 标识头，位于第一页数据区偏移 28。
const OPUS_HEAD: &[u8; 8] = b"OpusHead";
const OPUS_HEAD_OFFSET: usize = 28;

/// 可识别的容器格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    WebM,
    OggOpus,
}

impl MediaFormat {
    /// 短名称，与常见文件扩展名一致。
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFormat::WebM => "webm",
            MediaFormat::OggOpus => "ogg",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 按魔数识别格式；可用字节少于 [`SNIFF_LEN`] 时返回 `None`。
pub fn classify(buf: &[u8]) -> Option<MediaFormat> {
    if buf.len() < SNIFF_LEN {
        return None;
    }
    if buf.starts_with(&WEBM_MAGIC) {
        return Some(MediaFormat::WebM);
    }
    if buf.starts_with(OGG_MAGIC)
        && &buf[OPUS_HEAD_OFFSET..OPUS_HEAD_OFFSET + OPUS_HEAD.len()] == OPUS_HEAD
    {
        return Some(MediaFormat::OggOpus);
    }
    None
}
