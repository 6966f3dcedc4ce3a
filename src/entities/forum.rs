// 💬 Forum Topic - Static discussion listing ("El Tatami Digital")

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumTopic {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub replies: u32,
    pub views: u32,
    pub last_activity: &'static str,
    pub is_hot: bool,
}
