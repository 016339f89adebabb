use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// 临时目录中的数据文件路径（文件本身不创建）
pub fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data.json")
}

/// 在临时目录中写入数据文件
pub fn write_data(dir: &TempDir, content: &str) -> PathBuf {
    let path = data_path(dir);
    fs::write(&path, content).unwrap();
    path
}

pub fn read_json(path: &PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
