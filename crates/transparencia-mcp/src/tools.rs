//! MCP tool table and dispatch
//!
//! The portal query tools are data driven: each table entry names the
//! upstream endpoint and the filter parameters it forwards. Tool names,
//! descriptions, and result texts stay in Portuguese, the wire vocabulary
//! of the Portal da Transparência.

use serde_json::{json, Map, Value};

use transparencia::client::PortalClient;
use transparencia::config::portal::KEY_PREVIEW_LEN;

use crate::types::{ToolDefinition, ToolResult};

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy)]
enum ParamKind {
    String,
    Number,
}

impl ParamKind {
    fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
        }
    }
}

/// Parameter accepted by a portal query tool
struct ParamSpec {
    name: &'static str,
    kind: ParamKind,
    description: &'static str,
    default: Option<i64>,
}

/// One entry in the tool dispatch table
struct ToolSpec {
    name: &'static str,
    description: &'static str,
    /// Upstream endpoint path; `None` for tools handled locally
    endpoint: Option<&'static str>,
    params: &'static [ParamSpec],
}

// Pagination parameters shared by every query tool
const PAGINA: ParamSpec = ParamSpec {
    name: "pagina",
    kind: ParamKind::Number,
    description: "Número da página",
    default: Some(1),
};
const TAMANHO_PAGINA: ParamSpec = ParamSpec {
    name: "tamanhoPagina",
    kind: ParamKind::Number,
    description: "Tamanho da página",
    default: Some(10),
};
const CODIGO_ORGAO: ParamSpec = ParamSpec {
    name: "codigoOrgao",
    kind: ParamKind::String,
    description: "Código do órgão",
    default: None,
};

const fn filter(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::String,
        description,
        default: None,
    }
}

static TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "portal_check_api_key",
        description: "Verifica se a API key do Portal da Transparência está configurada",
        endpoint: None,
        params: &[],
    },
    ToolSpec {
        name: "portal_servidores_consultar",
        description: "Consulta dados de servidores públicos do Poder Executivo Federal",
        endpoint: Some("/servidores"),
        params: &[
            filter("orgaoServidorLotacao", "Código do órgão"),
            filter("nome", "Nome do servidor"),
            filter("cpf", "CPF do servidor"),
            PAGINA,
            TAMANHO_PAGINA,
        ],
    },
    ToolSpec {
        name: "portal_viagens_consultar",
        description: "Consulta viagens a serviço",
        endpoint: Some("/viagens"),
        params: &[
            filter("dataIdaDe", "Data de ida (DD/MM/AAAA)"),
            filter("dataIdaAte", "Data de ida até (DD/MM/AAAA)"),
            CODIGO_ORGAO,
            PAGINA,
            TAMANHO_PAGINA,
        ],
    },
    ToolSpec {
        name: "portal_contratos_consultar",
        description: "Consulta contratos do Poder Executivo Federal",
        endpoint: Some("/contratos"),
        params: &[
            filter("dataAssinaturaDe", "Data de assinatura inicial (DD/MM/AAAA)"),
            filter("dataAssinaturaAte", "Data de assinatura final (DD/MM/AAAA)"),
            CODIGO_ORGAO,
            PAGINA,
            TAMANHO_PAGINA,
        ],
    },
    ToolSpec {
        name: "portal_despesas_consultar",
        description: "Consulta despesas públicas",
        endpoint: Some("/despesas"),
        params: &[
            filter("dataEmissaoDe", "Data de emissão inicial (DD/MM/AAAA)"),
            filter("dataEmissaoAte", "Data de emissão final (DD/MM/AAAA)"),
            CODIGO_ORGAO,
            PAGINA,
            TAMANHO_PAGINA,
        ],
    },
    ToolSpec {
        name: "portal_beneficios_consultar",
        description: "Consulta programas sociais e beneficiários",
        endpoint: Some("/beneficios"),
        params: &[
            filter("codigoPrograma", "Código do programa social"),
            filter("nis", "Número de Identificação Social (NIS)"),
            PAGINA,
            TAMANHO_PAGINA,
        ],
    },
    ToolSpec {
        name: "portal_licitacoes_consultar",
        description: "Consulta processos licitatórios",
        endpoint: Some("/licitacoes"),
        params: &[
            filter("dataInicial", "Data inicial (DD/MM/AAAA)"),
            filter("dataFinal", "Data final (DD/MM/AAAA)"),
            CODIGO_ORGAO,
            PAGINA,
            TAMANHO_PAGINA,
        ],
    },
];

impl ToolSpec {
    fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for p in self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(p.kind.as_str()));
            prop.insert("description".to_string(), json!(p.description));
            if let Some(default) = p.default {
                prop.insert("default".to_string(), json!(default));
            }
            properties.insert(p.name.to_string(), Value::Object(prop));
        }
        json!({
            "type": "object",
            "properties": properties,
        })
    }
}

/// Return all tool definitions for tools/list
pub fn list_tools() -> Vec<ToolDefinition> {
    TOOLS
        .iter()
        .map(|t| ToolDefinition {
            name: t.name,
            description: t.description,
            input_schema: t.input_schema(),
        })
        .collect()
}

/// Dispatch a tool call, forwarding query tools to the portal API.
///
/// The `Err` string becomes the message of a `-32000` application error.
pub fn call_tool(
    portal: &PortalClient,
    name: &str,
    args: &Value,
) -> std::result::Result<ToolResult, String> {
    let Some(spec) = TOOLS.iter().find(|t| t.name == name) else {
        return Err(format!("Ferramenta desconhecida: {name}"));
    };

    let Some(endpoint) = spec.endpoint else {
        return Ok(check_api_key(portal));
    };

    let params = build_query(spec, args);
    match portal.query(endpoint, &params) {
        Ok(data) => Ok(ToolResult::text(
            serde_json::to_string_pretty(&data).unwrap_or_default(),
        )),
        Err(e) => Err(format!("Erro ao executar ferramenta {name}: {e}")),
    }
}

/// Copy the recognized filter fields out of the call arguments.
///
/// Unknown fields are ignored; null and empty-string values are dropped so
/// they never reach the query string. Numbers and booleans are stringified.
fn build_query(spec: &ToolSpec, args: &Value) -> Vec<(String, String)> {
    let mut params = Vec::new();
    for p in spec.params {
        let Some(value) = args.get(p.name) else {
            continue;
        };
        let text = match value {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        params.push((p.name.to_string(), text));
    }
    params
}

/// Confirm the key is configured without ever revealing it whole
fn check_api_key(portal: &PortalClient) -> ToolResult {
    let preview: String = portal.api_key().chars().take(KEY_PREVIEW_LEN).collect();
    ToolResult::text(format!(
        "API Key configurada e pronta para uso: {preview}..."
    ))
}
