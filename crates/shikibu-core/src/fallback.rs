//! Canned text served when no provider credential is configured or the
//! upstream call degrades. All user-visible fallback copy lives here so the
//! gateway and the surfaces stay in sync.

use rand::Rng;

/// Opening assistant message for a fresh transcript.
pub const GREETING: &str = "こんにちは！Shikibu Agentです。何を書きますか？";

/// Note attached to a degraded generate response.
pub const GENERATE_NOTE: &str = "APIキー未設定のため、サンプル応答を表示しています。";

/// Note attached to a degraded learn response.
pub const LEARN_NOTE: &str = "APIキー未設定のため、サンプル分析結果を表示しています。";

/// Fixed analysis sentence served when the learn path degrades.
pub const LEARN_FALLBACK: &str = "文章パターンを分析しました。今後の生成で活用されます。";

/// Simulated assistant replies used by the chat surfaces.
pub const CHAT_REPLIES: [&str; 4] = [
    "その内容について詳しく聞かせてください。",
    "面白いアイデアですね！どのように発展させますか？",
    "それは良い視点です。他の角度からも考えてみましょう。",
    "その文章を改善するポイントはありますか？",
];

/// Renders the three generate templates for a prompt, in fixed order.
/// The first two interpolate the prompt; the third is static.
pub fn generate_set(prompt: &str) -> [String; 3] {
    [
        format!("「{prompt}」について詳しく書いてみましょう。まず、この テーマの背景から始めて、具体例を交えながら説明していくと良いでしょう。"),
        format!("興味深いトピックですね。「{prompt}」については、複数の観点から考察することができます。"),
        "このテーマについて書く際は、読者の立場に立って分かりやすく説明することが重要です。".to_string(),
    ]
}

/// One pseudo-randomly chosen generate template, rendered for the prompt.
pub fn generate_reply(prompt: &str) -> String {
    let mut set = generate_set(prompt);
    let idx = rand::rng().random_range(0..set.len());
    std::mem::take(&mut set[idx])
}

/// One pseudo-randomly chosen simulated chat reply.
pub fn chat_reply() -> &'static str {
    CHAT_REPLIES[rand::rng().random_range(0..CHAT_REPLIES.len())]
}
