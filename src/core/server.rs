//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, grouped by upstream
//! API section. Each tool defines its parameters, an `execute()` method
//! that calls the gateway, and a pure `render()` for the markdown report.
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! Adding a new tool does NOT require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::api::FmpClient;
use super::config::Config;
use super::error::Result as FmpResult;
use crate::domains::{
    prompts::PromptService, resources::ResourceService, tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and
/// coordinates between the domain services. All of them share one gateway
/// client, so concurrent tool invocations reuse the same connection pool.
#[derive(Clone)]
pub struct FmpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared gateway to the upstream API.
    client: Arc<FmpClient>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl FmpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> FmpResult<Self> {
        let config = Arc::new(config);
        let client = Arc::new(FmpClient::new(&config.api)?);

        let resource_service = Arc::new(ResourceService::new(client.clone()));
        let prompt_service = Arc::new(PromptService::new());

        Ok(Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config,
            client,
            resource_service,
            prompt_service,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the shared gateway client.
    pub fn client(&self) -> &Arc<FmpClient> {
        &self.client
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Dispatches through the ToolRegistry to the matching tool's
    /// `execute()`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.client.clone());
        registry.call_tool(name, arguments).await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(
        &self,
        uri: &str,
    ) -> std::result::Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available resource templates (for HTTP transport).
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    /// List all available prompts (for HTTP transport).
    pub async fn list_prompts(&self) -> Vec<serde_json::Value> {
        let prompts = self.prompt_service.list_prompts().await;

        prompts
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Get a prompt by name (for HTTP transport).
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> std::result::Result<serde_json::Value, String> {
        // Convert serde_json::Value to HashMap<String, String>
        let args = arguments.and_then(|v| {
            v.as_object().map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        });

        match self.prompt_service.get_prompt(name, args).await {
            Ok(result) => Ok(serde_json::json!({
                "description": result.description,
                "messages": result.messages
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for FmpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Financial data tools and resources powered by the Financial \
                 Modeling Prep API. Tools return markdown reports for quotes, \
                 company fundamentals, statements, analyst coverage, and market \
                 movers."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        // Convert serde_json::Map to HashMap<String, String>
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_construction() {
        let server = FmpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "fmp-mcp-server");
        assert!(!server.version().is_empty());
    }

    #[test]
    fn test_list_tools_metadata() {
        let server = FmpServer::new(Config::default()).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 30);
        assert!(tools.iter().all(|t| t.get("inputSchema").is_some()));
    }
}
