/// 存储原生写命令
#[derive(Debug, Clone, PartialEq)]
pub enum WriteCommand {
    /// SET key value
    Set { key: String, value: String },
    /// DEL key
    Del { key: String },
    /// RPUSH key value [value ...]
    RPush { key: String, values: Vec<String> },
    /// SADD key member [member ...]
    SAdd { key: String, members: Vec<String> },
    /// ZADD key score member [score member ...]
    ZAdd { key: String, members: Vec<(String, f64)> },
    /// HSET key field value [field value ...]
    HSet { key: String, fields: Vec<(String, String)> },
    /// EXPIRE key seconds
    Expire { key: String, seconds: i64 },
}

impl WriteCommand {
    /// 命令名，用于日志
    pub fn name(&self) -> &'static str {
        match self {
            WriteCommand::Set { .. } => "SET",
            WriteCommand::Del { .. } => "DEL",
            WriteCommand::RPush { .. } => "RPUSH",
            WriteCommand::SAdd { .. } => "SADD",
            WriteCommand::ZAdd { .. } => "ZADD",
            WriteCommand::HSet { .. } => "HSET",
            WriteCommand::Expire { .. } => "EXPIRE",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            WriteCommand::Set { key, .. }
            | WriteCommand::Del { key }
            | WriteCommand::RPush { key, .. }
            | WriteCommand::SAdd { key, .. }
            | WriteCommand::ZAdd { key, .. }
            | WriteCommand::HSet { key, .. }
            | WriteCommand::Expire { key, .. } => key,
        }
    }
}

/// 延迟提交的写命令批次（对应 Redis pipeline）
///
/// 命令按暂存顺序保存，直到交给 `Store::execute` 才会发送。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Batch {
    commands: Vec<WriteCommand>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: WriteCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = WriteCommand>) {
        self.commands.extend(commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[WriteCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<WriteCommand> {
        self.commands
    }
}
