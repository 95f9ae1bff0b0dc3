use serde::{ Serialize, Deserialize };
use crate::render::View;

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "submit")] Submit {
        content: String,
    },
    #[serde(rename = "clear")]
    Clear,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "state")] State(View),
    #[serde(rename = "error")] Error {
        message: String,
    },
}
