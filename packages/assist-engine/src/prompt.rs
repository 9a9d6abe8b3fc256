//! Prompt construction for the chat-completion API
//!
//! The system prompt fixes the assistant role and the JSON response
//! shape; the user prompt embeds the structural analysis plus the
//! free-text request.

use crate::analysis::MindMapAnalysis;

/// System prompt sent with every request
pub fn system_prompt() -> String {
    "あなたはマインドマップ作成の専門アシスタントです。\n\
     現在のマインドマップの構造を理解し、ユーザーの要求に基づいて適切な提案を行ってください。\n\
     \n\
     マインドマップの特徴：\n\
     - ノードは階層構造で管理されています\n\
     - 各ノードにはラベルとデータが含まれています\n\
     - エッジはノード間の関係を表現しています\n\
     \n\
     提案の形式：\n\
     - 新しいノードの追加\n\
     - 既存ノードの修正\n\
     - 構造の改善提案\n\
     - 関連性の強化\n\
     \n\
     必ずJSON形式で応答してください。"
        .to_string()
}

/// User prompt embedding the analysis summary and the request
pub fn user_prompt(user_input: &str, analysis: &MindMapAnalysis) -> String {
    format!(
        "現在のマインドマップの状態：\n\
         - 総ノード数: {}\n\
         - 総エッジ数: {}\n\
         - ルートノード数: {}\n\
         - リーフノード数: {}\n\
         \n\
         ユーザーの要求: \"{}\"\n\
         \n\
         この要求に基づいて、マインドマップの改善提案をJSON形式で提供してください。\n\
         \n\
         応答形式：\n\
         {{\n\
           \"suggestions\": [\n\
             {{\n\
               \"type\": \"add_node\" | \"modify_node\" | \"add_connection\" | \"restructure\",\n\
               \"description\": \"提案の説明\",\n\
               \"priority\": \"high\" | \"medium\" | \"low\",\n\
               \"details\": {{}}\n\
             }}\n\
           ],\n\
           \"reasoning\": \"提案の理由\",\n\
           \"estimatedImpact\": \"high\" | \"medium\" | \"low\"\n\
         }}",
        analysis.total_nodes,
        analysis.total_edges,
        analysis.root_nodes.len(),
        analysis.leaf_nodes.len(),
        user_input
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn user_prompt_embeds_request_and_counts() {
        let analysis = analyze(&[], &[]);
        let prompt = user_prompt("テーマを追加して", &analysis);
        assert!(prompt.contains("テーマを追加して"));
        assert!(prompt.contains("総ノード数: 0"));
        assert!(prompt.contains("\"suggestions\""));
    }
}
