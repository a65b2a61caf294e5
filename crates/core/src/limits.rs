//! 作业标识与服务器名的长度上限
//!
//! 所有上限都在解析阶段显式校验，超长输入直接报错，不做截断。

/// 序列号最多包含的十进制位数
pub const MAX_SEQ_NUMBER_LEN: usize = 12;

/// 数组下标（含方括号）的最大长度
pub const MAX_SUBSCRIPT_LEN: usize = 32;

/// 服务器主机名的最大长度（不含端口）
pub const MAX_SERVER_NAME_LEN: usize = 255;

/// 端口号最多包含的位数
pub const MAX_PORT_DIGITS: usize = 5;

/// 服务端作业标识 `seq[sub].server:port` 的最大长度
pub const MAX_SERVER_JOB_ID_LEN: usize =
    MAX_SEQ_NUMBER_LEN + MAX_SUBSCRIPT_LEN + MAX_SERVER_NAME_LEN + MAX_PORT_DIGITS + 2;

/// 客户端作业标识（额外携带 `@server:port`）的最大长度
pub const MAX_CLIENT_JOB_ID_LEN: usize =
    MAX_SERVER_JOB_ID_LEN + MAX_SERVER_NAME_LEN + MAX_PORT_DIGITS + 2;
