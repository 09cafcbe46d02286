//! 命令系统：语义命令定义
//!
//! 架构：
//! - Command: 语义命令枚举（不关心具体输入来源）
//! - 视图只发命令，不直接改模型；宿主在主循环里消费命令总线

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::core::view::FocusView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 请求应用层关闭文件（可能弹出未保存确认，区别于仅移出工作集）
    CloseFile {
        path: PathBuf,
    },
    /// 打开文件并把选择焦点交给指定视图
    OpenAndSelect {
        path: PathBuf,
        view: FocusView,
    },
    /// 把文件加入工作集并设为当前文档（打开关联文件时使用）
    AddToWorkingSetAndSelect {
        path: PathBuf,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CloseFile { .. } => "closeFile",
            Command::OpenAndSelect { .. } => "openAndSelect",
            Command::AddToWorkingSetAndSelect { .. } => "addToWorkingSetAndSelect",
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Command::CloseFile { path }
            | Command::OpenAndSelect { path, .. }
            | Command::AddToWorkingSetAndSelect { path } => path,
        }
    }
}

#[derive(Clone)]
pub struct CommandBusSender {
    tx: Sender<Command>,
}

pub struct CommandBusReceiver {
    rx: Receiver<Command>,
}

pub fn command_bus() -> (CommandBusSender, CommandBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (CommandBusSender { tx }, CommandBusReceiver { rx })
}

impl CommandBusSender {
    pub fn send(&self, command: Command) {
        tracing::debug!(command = command.name(), "dispatch");
        // 接收端随宿主退出而关闭；此时丢弃命令即可
        let _ = self.tx.send(command);
    }
}

impl CommandBusReceiver {
    pub fn try_recv(&mut self) -> Result<Command, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn drain(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        while let Ok(cmd) = self.rx.try_recv() {
            out.push(cmd);
        }
        out
    }
}
